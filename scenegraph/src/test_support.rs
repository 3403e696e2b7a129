//! Fixtures shared by unit tests

use crate::core::hierarchy::HierarchyNode;
use hecs::Entity;

/// Spawn `count` empty entities in a throwaway world
pub(crate) fn spawn_entities(count: usize) -> Vec<Entity> {
    let mut world = hecs::World::new();
    (0..count).map(|_| world.spawn(())).collect()
}

/// Lay out `root` and `(child, parent)` edges breadth first.
///
/// Children keep the order they appear in `edges`.
pub(crate) fn flatten(root: Entity, edges: &[(Entity, Entity)]) -> Vec<HierarchyNode> {
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
