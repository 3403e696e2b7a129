//! Whole-store providers: `hecs::World` and the `World` wrapper

use super::{HierarchyLookup, HierarchyRef, Liveness, TransformAccess};
use crate::core::entity::{
    AbsoluteTransform, EntityInHierarchy, EntityInHierarchyCleanup, RootReference, World,
};
use crate::core::math::TransformQvvs;
use hecs::Entity;

pub(super) fn hierarchy_of(world: &hecs::World, root: Entity) -> Option<HierarchyRef<'_>> {
    if let Ok(buffer) = world.get::<&EntityInHierarchy>(root) {
        return Some(HierarchyRef::Live(buffer));
    }
    world
        .get::<&EntityInHierarchyCleanup>(root)
        .ok()
        .map(HierarchyRef::Cleanup)
}

pub(super) fn root_reference_of(world: &hecs::World, entity: Entity) -> Option<RootReference> {
    world.get::<&RootReference>(entity).ok().map(|r| *r)
}

pub(super) fn read_transform<C: AbsoluteTransform>(
    world: &hecs::World,
    entity: Entity,
) -> Option<TransformQvvs> {
    world.get::<&C>(entity).ok().map(|c| c.transform())
}

pub(super) fn write_transform<C: AbsoluteTransform>(
    world: &hecs::World,
    entity: Entity,
    transform: TransformQvvs,
) -> bool {
    match world.get::<&mut C>(entity) {
        Ok(mut component) => {
            component.set_transform(transform);
            true
        }
        Err(_) => false,
    }
}

impl Liveness for hecs::World {
    fn is_alive(&self, entity: Entity) -> bool {
        self.contains(entity)
    }
}

impl HierarchyLookup for hecs::World {
    fn hierarchy(&self, root: Entity) -> Option<HierarchyRef<'_>> {
        hierarchy_of(self, root)
    }

    fn root_reference(&self, entity: Entity) -> Option<RootReference> {
        root_reference_of(self, entity)
    }
}

impl<C: AbsoluteTransform> TransformAccess<C> for hecs::World {
    fn read(&self, entity: Entity) -> Option<TransformQvvs> {
        read_transform::<C>(self, entity)
    }

    fn write(&self, entity: Entity, transform: TransformQvvs) -> bool {
        write_transform::<C>(self, entity, transform)
    }
}

impl Liveness for World {
    fn is_alive(&self, entity: Entity) -> bool {
        self.contains(entity)
    }
}

impl HierarchyLookup for World {
    fn hierarchy(&self, root: Entity) -> Option<HierarchyRef<'_>> {
        hierarchy_of(self.inner(), root)
    }

    fn root_reference(&self, entity: Entity) -> Option<RootReference> {
        root_reference_of(self.inner(), entity)
    }
}

impl<C: AbsoluteTransform> TransformAccess<C> for World {
    fn read(&self, entity: Entity) -> Option<TransformQvvs> {
        read_transform::<C>(self.inner(), entity)
    }

    fn write(&self, entity: Entity, transform: TransformQvvs) -> bool {
        write_transform::<C>(self.inner(), entity, transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{TickedWorldTransform, WorldTransform};
    use crate::test_support::flatten;
    use glam::Vec3;

    #[test]
    fn test_hierarchy_falls_back_to_cleanup() {
        let mut world = hecs::World::new();
        let root = world.spawn(());
        let child = world.spawn(());
        let nodes = flatten(root, &[(child, root)]);
        world
            .insert_one(root, EntityInHierarchyCleanup(nodes.clone()))
            .unwrap();

        let hierarchy = world.hierarchy(root).unwrap();
        assert!(hierarchy.is_cleanup());
        assert_eq!(&*hierarchy, nodes.as_slice());
        drop(hierarchy);

        world.insert_one(root, EntityInHierarchy::new(nodes)).unwrap();
        assert!(!world.hierarchy(root).unwrap().is_cleanup());
        assert!(!world.has_hierarchy(child));
    }

    #[test]
    fn test_read_write_per_component() {
        let mut world = hecs::World::new();
        let entity = world.spawn((WorldTransform::default(),));

        assert!(TransformAccess::<WorldTransform>::write(
            &world,
            entity,
            TransformQvvs::from_position(Vec3::Z)
        ));
        assert_eq!(
            TransformAccess::<WorldTransform>::read(&world, entity).map(|t| t.position),
            Some(Vec3::Z)
        );

        // No ticked component on this entity
        assert!(TransformAccess::<TickedWorldTransform>::read(&world, entity).is_none());
        assert!(!TransformAccess::<TickedWorldTransform>::write(
            &world,
            entity,
            TransformQvvs::IDENTITY
        ));
    }

    #[test]
    fn test_liveness_is_existence() {
        let mut world = hecs::World::new();
        let entity = world.spawn(());
        assert!(world.is_alive(entity));
        world.despawn(entity).unwrap();
        assert!(!world.is_alive(entity));
    }
}
