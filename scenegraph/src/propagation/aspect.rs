//! Per-entity transform facade

use super::{Propagator, Space, TransformWrite};
use crate::access::{HierarchyLookup, Liveness, TransformAccess};
use crate::config::{HierarchyConfig, Validation};
use crate::core::entity::{locate, AbsoluteTransform};
use crate::core::hierarchy::{HierarchyError, HierarchyHandle};
use crate::core::math::{TransformDelta, TransformQvvs};
use glam::{Quat, Vec3};
use hecs::Entity;
use std::marker::PhantomData;

/// Generates one thin method per write kind, all funnelling into `write`
macro_rules! write_methods {
    ($($(#[$doc:meta])* $name:ident($arg:ident: $ty:ty) => $space:ident, $variant:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, $arg: $ty) -> Result<usize, HierarchyError> {
                self.write(Space::$space, TransformWrite::$variant($arg))
            }
        )*
    };
}

/// Reads and writes one entity's `C` transform through whatever providers the
/// caller holds.
///
/// Every write resolves the entity's place in its hierarchy, runs the engine
/// and returns the number of transforms written. An entity in no hierarchy is
/// its own root, so its local space is world space.
pub struct TransformAspect<'a, C, H: ?Sized, T: ?Sized, L: ?Sized> {
    entity: Entity,
    hierarchies: &'a H,
    transforms: &'a T,
    liveness: &'a L,
    validation: Validation,
    _component: PhantomData<fn() -> C>,
}

impl<'a, C, A> TransformAspect<'a, C, A, A, A>
where
    C: AbsoluteTransform,
    A: HierarchyLookup + TransformAccess<C> + Liveness + ?Sized,
{
    /// Aspect over a provider answering every capability
    pub fn new(access: &'a A, entity: Entity) -> Self {
        Self::from_lookups(access, access, access, entity)
    }
}

impl<'a, C, H, T, L> TransformAspect<'a, C, H, T, L>
where
    C: AbsoluteTransform,
    H: HierarchyLookup + ?Sized,
    T: TransformAccess<C> + ?Sized,
    L: Liveness + ?Sized,
{
    /// Aspect over one provider per capability
    pub fn from_lookups(hierarchies: &'a H, transforms: &'a T, liveness: &'a L, entity: Entity) -> Self {
        Self {
            entity,
            hierarchies,
            transforms,
            liveness,
            validation: Validation::default(),
            _component: PhantomData,
        }
    }

    /// Override when contract checks run for writes through this aspect
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// The entity this aspect targets
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Absolute transform
    pub fn world_transform(&self) -> Option<TransformQvvs> {
        self.transforms.read(self.entity)
    }

    /// Absolute position
    pub fn world_position(&self) -> Option<Vec3> {
        self.world_transform().map(|transform| transform.position)
    }

    /// Absolute transform of the nearest live parent, if any
    pub fn parent_transform(&self) -> Option<TransformQvvs> {
        let location = locate(self.hierarchies, self.entity)?;
        let parent = location.handle().find_alive_parent(self.liveness)?;
        self.transforms.read(parent.entity())
    }

    /// Transform relative to the nearest live parent, or the absolute
    /// transform when there is none
    pub fn local_transform(&self) -> Option<TransformQvvs> {
        let world = self.world_transform()?;
        Some(match self.parent_transform() {
            Some(parent) => parent.inverse_mul(&world),
            None => world,
        })
    }

    /// Run `f` on the entity's hierarchy handle, if it is in a hierarchy
    pub fn with_handle<R>(&self, f: impl FnOnce(HierarchyHandle<'_>) -> R) -> Option<R> {
        let location = locate(self.hierarchies, self.entity)?;
        Some(f(location.handle()))
    }

    /// Apply one write and propagate it
    pub fn write(&self, space: Space, write: TransformWrite) -> Result<usize, HierarchyError> {
        let mut propagator = Propagator::new(HierarchyConfig {
            validation: self.validation,
            ..Default::default()
        });
        propagator.apply::<C, H, T, L>(
            self.hierarchies,
            self.transforms,
            self.liveness,
            self.entity,
            space,
            write,
        )
    }

    write_methods! {
        /// Replace the local position
        set_local_position(position: Vec3) => Local, SetPosition;
        /// Replace the absolute position
        set_world_position(position: Vec3) => World, SetPosition;
        /// Replace the local rotation
        set_local_rotation(rotation: Quat) => Local, SetRotation;
        /// Replace the absolute rotation
        set_world_rotation(rotation: Quat) => World, SetRotation;
        /// Replace the local scale
        set_local_scale(scale: f32) => Local, SetScale;
        /// Replace the absolute scale
        set_world_scale(scale: f32) => World, SetScale;
        /// Replace the local stretch
        set_local_stretch(stretch: Vec3) => Local, SetStretch;
        /// Replace the absolute stretch
        set_world_stretch(stretch: Vec3) => World, SetStretch;
        /// Replace the whole local transform
        set_local_transform(transform: TransformQvvs) => Local, SetTransform;
        /// Replace the whole absolute transform
        set_world_transform(transform: TransformQvvs) => World, SetTransform;
        /// Move in the parent's frame
        translate_local(offset: Vec3) => Local, DeltaPosition;
        /// Move in world space
        translate_world(offset: Vec3) => World, DeltaPosition;
        /// Rotate in the parent's frame
        rotate_local(rotation: Quat) => Local, DeltaRotation;
        /// Rotate in world space
        rotate_world(rotation: Quat) => World, DeltaRotation;
        /// Multiply the local scale
        scale_local(factor: f32) => Local, DeltaScale;
        /// Multiply the absolute scale
        scale_world(factor: f32) => World, DeltaScale;
        /// Add to the local stretch
        stretch_local(delta: Vec3) => Local, DeltaStretch;
        /// Add to the absolute stretch
        stretch_world(delta: Vec3) => World, DeltaStretch;
        /// Apply a full delta in the parent's frame
        apply_local_delta(delta: TransformDelta) => Local, DeltaTransform;
        /// Apply a full delta in world space
        apply_world_delta(delta: TransformDelta) => World, DeltaTransform;
    }
}
