//! Shared fixtures for integration tests
#![allow(dead_code)]

use scenegraph::prelude::*;

/// Install the library subscriber once; later calls are no-ops
pub fn init_tracing() {
    scenegraph::init_logging_with(Some("scenegraph=debug"));
}

/// Lay out `root` and `(child, parent)` edges breadth first, children in edge order
pub fn flatten(root: Entity, edges: &[(Entity, Entity)]) -> Vec<HierarchyNode> {
    let mut nodes = vec![HierarchyNode::root(root, 0)];
    let mut cursor = 0;
    while cursor < nodes.len() {
        let parent = nodes[cursor].entity;
        let first = nodes.len() as u32;
        let children: Vec<Entity> = edges
            .iter()
            .filter(|(_, p)| *p == parent)
            .map(|(c, _)| *c)
            .collect();
        nodes[cursor].first_child_index = first;
        nodes[cursor].child_count = children.len() as u32;
        for child in children {
            nodes.push(HierarchyNode::new(child, cursor as u32, 0, 0));
        }
        cursor += 1;
    }
    nodes
}

/// Attach a breadth-first array to `root` and root references to every dependent
pub fn install(world: &mut World, root: Entity, edges: &[(Entity, Entity)]) {
    let nodes = flatten(root, edges);
    for (index, node) in nodes.iter().enumerate().skip(1) {
        world
            .insert_one(node.entity, RootReference::new(root, index as u32))
            .unwrap();
    }
    world.insert_one(root, EntityInHierarchy::new(nodes)).unwrap();
}

/// Spawn an entity carrying both transform copies at `position`
pub fn spawn_at(world: &mut World, position: Vec3) -> Entity {
    world.spawn((
        WorldTransform::from_position(position),
        TickedWorldTransform::from_position(position),
    ))
}

pub fn position(world: &World, entity: Entity) -> Vec3 {
    world.get::<WorldTransform>(entity).unwrap().position()
}

pub fn world_transform(world: &World, entity: Entity) -> TransformQvvs {
    world.get::<WorldTransform>(entity).unwrap().0
}
