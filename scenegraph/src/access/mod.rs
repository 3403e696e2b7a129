//! Capability traits the propagation engine is written against
//!
//! The engine needs three things from the entity store: whether an entity is
//! alive ([`Liveness`]), where hierarchy arrays live ([`HierarchyLookup`]) and
//! how to read and write absolute transforms ([`TransformAccess`]). Three
//! families of providers implement them:
//!
//! - the whole store (`hecs::World` and the [`World`](crate::core::entity::World)
//!   wrapper), which answers every capability;
//! - narrow lookups ([`EntityExists`], [`HasComponent`], [`HierarchyBuffers`],
//!   [`TransformLookup`]), each answering exactly one;
//! - the [`TransformBroker`], which multiplexes all of them behind declared
//!   read/write permissions.
//!
//! Writes are immediate: a write is visible to the next read through the same
//! provider. Two writes into overlapping subtrees of the same hierarchy must
//! never run concurrently, whatever the provider.

mod broker;
mod lookup;
mod world_access;

pub use broker::{TransformBroker, TransformBrokerBuilder};
pub use lookup::{EntityExists, HasComponent, HierarchyBuffers, TransformLookup};

use crate::core::entity::{
    AbsoluteTransform, EntityInHierarchy, EntityInHierarchyCleanup, RootReference,
};
use crate::core::hierarchy::HierarchyNode;
use crate::core::math::TransformQvvs;
use hecs::Entity;
use std::ops::Deref;

/// Whether an entity counts as alive when looking for a parent
pub trait Liveness {
    /// True if `entity` is alive for this provider's notion of liveness
    fn is_alive(&self, entity: Entity) -> bool;
}

/// Access to hierarchy arrays and dependents' position records
pub trait HierarchyLookup {
    /// The array owned by `root`: its live buffer, or the cleanup copy if the
    /// root has been destroyed
    fn hierarchy(&self, root: Entity) -> Option<HierarchyRef<'_>>;

    /// The root reference of a dependent entity
    fn root_reference(&self, entity: Entity) -> Option<RootReference>;

    /// Whether `root` owns a live or cleanup array
    fn has_hierarchy(&self, root: Entity) -> bool {
        self.hierarchy(root).is_some()
    }
}

/// Read and write access to one absolute-transform component type
///
/// Writes go through `&self`; providers backed by `hecs` use its runtime
/// borrow tracking, so a provider can be shared by the engine as both the
/// transform and the liveness source.
pub trait TransformAccess<C: AbsoluteTransform> {
    /// Current transform, or `None` if the entity lacks the component
    fn read(&self, entity: Entity) -> Option<TransformQvvs>;

    /// Overwrite the transform; returns false if the entity lacks the component
    fn write(&self, entity: Entity, transform: TransformQvvs) -> bool;
}

/// A borrowed hierarchy array
pub enum HierarchyRef<'w> {
    /// A live root's buffer
    Live(hecs::Ref<'w, EntityInHierarchy>),
    /// The cleanup copy of a destroyed root
    Cleanup(hecs::Ref<'w, EntityInHierarchyCleanup>),
    /// A plain slice, for providers not backed by `hecs`
    Slice(&'w [HierarchyNode]),
}

impl HierarchyRef<'_> {
    /// Whether this is a cleanup copy
    pub fn is_cleanup(&self) -> bool {
        matches!(self, HierarchyRef::Cleanup(_))
    }
}

impl Deref for HierarchyRef<'_> {
    type Target = [HierarchyNode];

    fn deref(&self) -> &[HierarchyNode] {
        match self {
            HierarchyRef::Live(buffer) => buffer.nodes(),
            HierarchyRef::Cleanup(buffer) => buffer.nodes(),
            HierarchyRef::Slice(nodes) => nodes,
        }
    }
}

impl std::fmt::Debug for HierarchyRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            HierarchyRef::Live(_) => "Live",
            HierarchyRef::Cleanup(_) => "Cleanup",
            HierarchyRef::Slice(_) => "Slice",
        };
        f.debug_struct("HierarchyRef")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}
