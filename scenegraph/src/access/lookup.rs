//! Narrow per-capability lookups
//!
//! Each lookup borrows the store and answers one capability only, so a caller
//! can hand out exactly the access a job needs. They are `Copy` and can be
//! shared across threads for reads. [`TransformLookup`] writes are NOT safe to
//! issue concurrently for two entities of the same hierarchy: propagation from
//! either may touch the other's descendants.

use super::world_access::{hierarchy_of, read_transform, root_reference_of, write_transform};
use super::{HierarchyLookup, HierarchyRef, Liveness, TransformAccess};
use crate::core::entity::{AbsoluteTransform, RootReference};
use crate::core::math::TransformQvvs;
use hecs::Entity;
use std::marker::PhantomData;

/// Liveness as plain existence in the store
#[derive(Clone, Copy)]
pub struct EntityExists<'w> {
    world: &'w hecs::World,
}

impl std::fmt::Debug for EntityExists<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityExists").finish_non_exhaustive()
    }
}

impl<'w> EntityExists<'w> {
    /// Create the lookup
    pub fn new(world: &'w hecs::World) -> Self {
        Self { world }
    }
}

impl Liveness for EntityExists<'_> {
    fn is_alive(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }
}

/// Liveness as "carries component `M`"
///
/// Useful when destroyed entities linger in the store, or when only entities
/// with a given capability should act as parents.
pub struct HasComponent<'w, M> {
    world: &'w hecs::World,
    _marker: PhantomData<fn() -> M>,
}

impl<M> Clone for HasComponent<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for HasComponent<'_, M> {}

impl<M> std::fmt::Debug for HasComponent<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HasComponent")
            .field("component", &std::any::type_name::<M>())
            .finish()
    }
}

impl<'w, M: hecs::Component> HasComponent<'w, M> {
    /// Create the lookup
    pub fn new(world: &'w hecs::World) -> Self {
        Self {
            world,
            _marker: PhantomData,
        }
    }
}

impl<M: hecs::Component> Liveness for HasComponent<'_, M> {
    fn is_alive(&self, entity: Entity) -> bool {
        self.world
            .entity(entity)
            .map(|entity_ref| entity_ref.has::<M>())
            .unwrap_or(false)
    }
}

/// Hierarchy buffers and root references
#[derive(Clone, Copy)]
pub struct HierarchyBuffers<'w> {
    world: &'w hecs::World,
}

impl std::fmt::Debug for HierarchyBuffers<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyBuffers").finish_non_exhaustive()
    }
}

impl<'w> HierarchyBuffers<'w> {
    /// Create the lookup
    pub fn new(world: &'w hecs::World) -> Self {
        Self { world }
    }
}

impl HierarchyLookup for HierarchyBuffers<'_> {
    fn hierarchy(&self, root: Entity) -> Option<HierarchyRef<'_>> {
        hierarchy_of(self.world, root)
    }

    fn root_reference(&self, entity: Entity) -> Option<RootReference> {
        root_reference_of(self.world, entity)
    }
}

/// Read/write access to one absolute-transform component type
pub struct TransformLookup<'w, C> {
    world: &'w hecs::World,
    _marker: PhantomData<fn() -> C>,
}

impl<C> Clone for TransformLookup<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for TransformLookup<'_, C> {}

impl<C> std::fmt::Debug for TransformLookup<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformLookup")
            .field("component", &std::any::type_name::<C>())
            .finish()
    }
}

impl<'w, C: AbsoluteTransform> TransformLookup<'w, C> {
    /// Create the lookup
    pub fn new(world: &'w hecs::World) -> Self {
        Self {
            world,
            _marker: PhantomData,
        }
    }
}

impl<C: AbsoluteTransform> TransformAccess<C> for TransformLookup<'_, C> {
    fn read(&self, entity: Entity) -> Option<TransformQvvs> {
        read_transform::<C>(self.world, entity)
    }

    fn write(&self, entity: Entity, transform: TransformQvvs) -> bool {
        write_transform::<C>(self.world, entity, transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::WorldTransform;
    use glam::Vec3;

    #[test]
    fn test_has_component_liveness() {
        let mut world = hecs::World::new();
        let with = world.spawn((WorldTransform::default(),));
        let without = world.spawn(());

        let alive = HasComponent::<WorldTransform>::new(&world);
        assert!(alive.is_alive(with));
        assert!(!alive.is_alive(without));

        let exists = EntityExists::new(&world);
        assert!(exists.is_alive(without));
    }

    #[test]
    fn test_debug_names_lookup() {
        let world = hecs::World::new();
        assert_eq!(format!("{:?}", EntityExists::new(&world)), "EntityExists { .. }");
        assert_eq!(format!("{:?}", HierarchyBuffers::new(&world)), "HierarchyBuffers { .. }");
        assert!(format!("{:?}", TransformLookup::<WorldTransform>::new(&world)).contains("WorldTransform"));
    }

    #[test]
    fn test_transform_lookup_round_trip() {
        let mut world = hecs::World::new();
        let entity = world.spawn((WorldTransform::default(),));
        let bare = world.spawn(());

        let lookup = TransformLookup::<WorldTransform>::new(&world);
        assert!(lookup.write(entity, TransformQvvs::from_position(Vec3::ONE)));
        assert_eq!(lookup.read(entity).map(|t| t.position), Some(Vec3::ONE));

        assert!(lookup.read(bare).is_none());
        assert!(!lookup.write(bare, TransformQvvs::IDENTITY));
    }
}
