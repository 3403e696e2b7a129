//! Writing transforms and propagating them through hierarchies
//!
//! Every mutation is a [`WriteCommand`] handed to a [`Propagator`]. The free
//! functions here run the engine with the default configuration for call
//! sites that do not keep a propagator around.

mod aspect;
mod command;
mod engine;

pub use aspect::TransformAspect;
pub use command::{Space, TransformWrite, WriteCommand};
pub use engine::Propagator;

use crate::access::{HierarchyLookup, Liveness, TransformAccess};
use crate::core::entity::AbsoluteTransform;
use crate::core::hierarchy::{HierarchyError, HierarchyNode};
use hecs::Entity;

/// Apply `commands` to `hierarchy` and propagate each to its subtree.
///
/// Returns the number of transforms written.
pub fn write_and_propagate<C, T, L>(
    hierarchy: &[HierarchyNode],
    commands: &[WriteCommand],
    transforms: &T,
    liveness: &L,
) -> Result<usize, HierarchyError>
where
    C: AbsoluteTransform,
    T: TransformAccess<C> + ?Sized,
    L: Liveness + ?Sized,
{
    Propagator::default().write_and_propagate::<C, T, L>(hierarchy, commands, transforms, liveness)
}

/// Apply one write to `entity` through a provider answering every capability
pub fn apply_write<C, A>(
    access: &A,
    entity: Entity,
    space: Space,
    write: TransformWrite,
) -> Result<usize, HierarchyError>
where
    C: AbsoluteTransform,
    A: HierarchyLookup + TransformAccess<C> + Liveness + ?Sized,
{
    Propagator::default().apply::<C, A, A, A>(access, access, access, entity, space, write)
}

/// Apply one write to `entity` through one provider per capability
pub fn apply_write_with<C, H, T, L>(
    hierarchies: &H,
    transforms: &T,
    liveness: &L,
    entity: Entity,
    space: Space,
    write: TransformWrite,
) -> Result<usize, HierarchyError>
where
    C: AbsoluteTransform,
    H: HierarchyLookup + ?Sized,
    T: TransformAccess<C> + ?Sized,
    L: Liveness + ?Sized,
{
    Propagator::default().apply::<C, H, T, L>(hierarchies, transforms, liveness, entity, space, write)
}
