//! Cursor-based navigation over a hierarchy array

use super::node::{HierarchyNode, NodeFlags};
use crate::access::Liveness;
use hecs::Entity;
use std::fmt;
use std::ops::Range;

/// Handle to the root (index 0) of `hierarchy`, or `None` if the array is empty
pub fn root_handle(hierarchy: &[HierarchyNode]) -> Option<HierarchyHandle<'_>> {
    handle_at(hierarchy, 0)
}

/// Handle to `index`, or `None` if the index is out of range
pub fn handle_at(hierarchy: &[HierarchyNode], index: usize) -> Option<HierarchyHandle<'_>> {
    (index < hierarchy.len()).then_some(HierarchyHandle { hierarchy, index })
}

/// A copyable cursor into a hierarchy array
///
/// Handles borrow the array they point into and never outlive it. Navigation
/// returns `Option` where the result may be absent; there is no null handle.
#[derive(Clone, Copy)]
pub struct HierarchyHandle<'a> {
    hierarchy: &'a [HierarchyNode],
    index: usize,
}

impl fmt::Debug for HierarchyHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchyHandle")
            .field("entity", &self.entity())
            .field("index", &self.index)
            .field("len", &self.hierarchy.len())
            .finish()
    }
}

impl PartialEq for HierarchyHandle<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.hierarchy, other.hierarchy) && self.index == other.index
    }
}

impl Eq for HierarchyHandle<'_> {}

impl<'a> HierarchyHandle<'a> {
    pub(crate) fn from_parts(hierarchy: &'a [HierarchyNode], index: usize) -> Self {
        debug_assert!(index < hierarchy.len(), "handle index {index} out of range");
        Self { hierarchy, index }
    }

    /// Index of this node in the array
    pub fn index(&self) -> usize {
        self.index
    }

    /// The node record
    pub fn node(&self) -> &'a HierarchyNode {
        &self.hierarchy[self.index]
    }

    /// Entity at this node
    pub fn entity(&self) -> Entity {
        self.node().entity
    }

    /// Node flags
    pub fn flags(&self) -> NodeFlags {
        self.node().flags
    }

    /// The whole array this handle points into
    pub fn hierarchy(&self) -> &'a [HierarchyNode] {
        self.hierarchy
    }

    /// Whether this is the root node
    pub fn is_root(&self) -> bool {
        self.index == 0
    }

    /// Whether another system owns this node's absolute transform
    pub fn is_copy_parent(&self) -> bool {
        self.node().is_copy_parent()
    }

    /// Handle to the root of the same array
    pub fn root(&self) -> HierarchyHandle<'a> {
        HierarchyHandle {
            hierarchy: self.hierarchy,
            index: 0,
        }
    }

    /// The structural parent recorded in the array, regardless of whether its
    /// entity still exists. `None` for the root, or if the recorded parent
    /// does not precede this node.
    pub fn structural_parent(&self) -> Option<HierarchyHandle<'a>> {
        if self.is_root() {
            return None;
        }
        let parent = self.node().parent();
        // A back-link that does not point backwards is malformed
        if parent >= self.index {
            return None;
        }
        handle_at(self.hierarchy, parent)
    }

    /// Walk up to the nearest ancestor that can act as this node's parent.
    ///
    /// An ancestor qualifies if `liveness` accepts its entity. The root always
    /// qualifies: an array is only reachable through its root's live or cleanup
    /// buffer, so reaching index 0 means that buffer exists. Dead intermediate
    /// nodes are skipped, grafting the subtree onto the nearest survivor.
    /// Returns `None` for the root itself.
    pub fn find_alive_parent<L: Liveness + ?Sized>(&self, liveness: &L) -> Option<HierarchyHandle<'a>> {
        let mut current = *self;
        while let Some(parent) = current.structural_parent() {
            if parent.is_root() || liveness.is_alive(parent.entity()) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.node().child_count as usize
    }

    /// The direct children
    pub fn children(&self) -> Children<'a> {
        let node = self.node();
        Children {
            hierarchy: self.hierarchy,
            parent: self.index,
            first: node.first_child_index as usize,
            count: node.child_count as usize,
        }
    }

    /// Position of this node among its parent's children; 0 for the root
    pub fn sibling_index(&self) -> usize {
        match self.structural_parent() {
            Some(parent) => self.index - parent.node().first_child_index as usize,
            None => 0,
        }
    }

    /// Index ranges of the subtree below this node, one contiguous range per level
    pub fn descendant_levels(&self) -> DescendantLevels<'a> {
        DescendantLevels::new(self.hierarchy, self.node().children_range())
    }

    /// Every descendant, top-down and level by level
    pub fn descendants(&self) -> impl Iterator<Item = HierarchyHandle<'a>> + 'a {
        let hierarchy = self.hierarchy;
        self.descendant_levels()
            .flatten()
            .map(move |index| HierarchyHandle { hierarchy, index })
    }

    /// Number of nodes below this one, excluding itself
    pub fn count_descendants(&self) -> usize {
        self.descendant_levels().map(|level| level.len()).sum()
    }
}

/// The direct children of a node
#[derive(Clone, Copy)]
pub struct Children<'a> {
    hierarchy: &'a [HierarchyNode],
    parent: usize,
    first: usize,
    count: usize,
}

impl fmt::Debug for Children<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("parent", &self.parent)
            .field("range", &(self.first..self.first + self.count))
            .finish()
    }
}

impl<'a> Children<'a> {
    /// Number of children
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether there are no children
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The `i`-th child, or `None` if `i` is out of range
    pub fn get(&self, i: usize) -> Option<HierarchyHandle<'a>> {
        if i >= self.count {
            return None;
        }
        handle_at(self.hierarchy, self.first + i)
    }

    /// The `i`-th child.
    ///
    /// `i` must be below [`Children::len`]. Debug builds check this and panic
    /// naming the parent and its range; release builds do not.
    pub fn at(&self, i: usize) -> HierarchyHandle<'a> {
        debug_assert!(
            i < self.count,
            "child {} requested from {:?} at index {}, which has children {}..{}",
            i,
            self.hierarchy[self.parent].entity,
            self.parent,
            self.first,
            self.first + self.count
        );
        HierarchyHandle {
            hierarchy: self.hierarchy,
            index: self.first + i,
        }
    }

    /// Iterate the children in order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = HierarchyHandle<'a>> + 'a {
        let hierarchy = self.hierarchy;
        let end = (self.first + self.count).min(hierarchy.len());
        (self.first.min(end)..end).map(move |index| HierarchyHandle { hierarchy, index })
    }
}

/// Breadth-first frontier expansion over a subtree.
///
/// Because children of a contiguous run of nodes are contiguous, the next
/// level is the span from the first parent's first child to the end of the
/// last parent's children. Leaves record an empty range that may start
/// anywhere, so only nodes with children bound the span.
#[derive(Debug, Clone)]
pub struct DescendantLevels<'a> {
    hierarchy: &'a [HierarchyNode],
    next: Range<usize>,
}

impl<'a> DescendantLevels<'a> {
    pub(crate) fn new(hierarchy: &'a [HierarchyNode], first: Range<usize>) -> Self {
        Self {
            hierarchy,
            next: clamp(first, hierarchy.len()),
        }
    }
}

impl Iterator for DescendantLevels<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.next.is_empty() {
            return None;
        }
        let level = self.next.clone();
        let frontier = &self.hierarchy[level.clone()];
        let first = frontier.iter().find(|node| node.child_count > 0);
        let last = frontier.iter().rev().find(|node| node.child_count > 0);
        self.next = match (first, last) {
            (Some(first), Some(last)) => {
                let start = first.first_child_index as usize;
                let end = last.first_child_index as usize + last.child_count as usize;
                // A well-formed layout always moves forward; anything else ends the walk
                if start >= level.end {
                    clamp(start..end, self.hierarchy.len())
                } else {
                    0..0
                }
            }
            _ => 0..0,
        };
        Some(level)
    }
}

fn clamp(range: Range<usize>, len: usize) -> Range<usize> {
    let end = range.end.min(len);
    range.start.min(end)..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flatten, spawn_entities};

    struct AllAlive;

    impl Liveness for AllAlive {
        fn is_alive(&self, _entity: Entity) -> bool {
            true
        }
    }

    struct DeadSet(Vec<Entity>);

    impl Liveness for DeadSet {
        fn is_alive(&self, entity: Entity) -> bool {
            !self.0.contains(&entity)
        }
    }

    /// root -> (a, b), a -> (a0, a1, a2), b -> (b0, b1, b2)
    fn two_by_three() -> (Vec<Entity>, Vec<HierarchyNode>) {
        let e = spawn_entities(9);
        let edges = [
            (e[1], e[0]),
            (e[2], e[0]),
            (e[3], e[1]),
            (e[4], e[1]),
            (e[5], e[1]),
            (e[6], e[2]),
            (e[7], e[2]),
            (e[8], e[2]),
        ];
        let nodes = flatten(e[0], &edges);
        (e, nodes)
    }

    #[test]
    fn test_root_and_handle_at() {
        let (e, nodes) = two_by_three();

        let root = root_handle(&nodes).unwrap();
        assert!(root.is_root());
        assert_eq!(root.entity(), e[0]);

        assert!(handle_at(&nodes, 8).is_some());
        assert!(handle_at(&nodes, 9).is_none());
        assert!(root_handle(&[]).is_none());
    }

    #[test]
    fn test_count_descendants_two_by_three() {
        let (_, nodes) = two_by_three();
        let root = root_handle(&nodes).unwrap();

        assert_eq!(root.count_descendants(), 8);
        assert_eq!(root.children().at(0).count_descendants(), 3);
        assert_eq!(handle_at(&nodes, 5).unwrap().count_descendants(), 0);
    }

    #[test]
    fn test_descendant_levels_are_contiguous() {
        let (_, nodes) = two_by_three();
        let root = root_handle(&nodes).unwrap();

        let levels: Vec<_> = root.descendant_levels().collect();
        assert_eq!(levels, vec![1..3, 3..9]);

        let b = root.children().at(1);
        let levels: Vec<_> = b.descendant_levels().collect();
        assert_eq!(levels, vec![6..9]);
    }

    #[test]
    fn test_structural_parent_and_sibling_index() {
        let (e, nodes) = two_by_three();
        let b1 = nodes.iter().position(|n| n.entity == e[7]).unwrap();
        let handle = handle_at(&nodes, b1).unwrap();

        let parent = handle.structural_parent().unwrap();
        assert_eq!(parent.entity(), e[2]);
        assert_eq!(handle.sibling_index(), 1);
        assert_eq!(parent.sibling_index(), 1);

        let root = parent.structural_parent().unwrap();
        assert!(root.is_root());
        assert!(root.structural_parent().is_none());
        assert_eq!(root.sibling_index(), 0);
        assert_eq!(handle.root(), root);
    }

    #[test]
    fn test_children_iteration() {
        let (e, nodes) = two_by_three();
        let root = root_handle(&nodes).unwrap();

        let children = root.children();
        assert_eq!(children.len(), 2);
        let entities: Vec<_> = children.iter().map(|c| c.entity()).collect();
        assert_eq!(entities, vec![e[1], e[2]]);
        assert!(children.get(2).is_none());

        let leaf = children.at(0).children().at(0);
        assert!(leaf.children().is_empty());
        assert_eq!(leaf.children().iter().count(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "child 2 requested")]
    fn test_children_at_out_of_range_panics_in_debug() {
        let (_, nodes) = two_by_three();
        let root = root_handle(&nodes).unwrap();
        let _ = root.children().at(2);
    }

    #[test]
    fn test_find_alive_parent_skips_dead_intermediate() {
        let e = spawn_entities(4);
        // root -> a -> b -> c
        let nodes = flatten(e[0], &[(e[1], e[0]), (e[2], e[1]), (e[3], e[2])]);
        let c = handle_at(&nodes, 3).unwrap();

        assert_eq!(c.find_alive_parent(&AllAlive).unwrap().entity(), e[2]);

        let dead = DeadSet(vec![e[2]]);
        assert_eq!(c.find_alive_parent(&dead).unwrap().entity(), e[1]);
    }

    #[test]
    fn test_find_alive_parent_reaches_root() {
        let e = spawn_entities(3);
        let nodes = flatten(e[0], &[(e[1], e[0]), (e[2], e[1])]);
        let leaf = handle_at(&nodes, 2).unwrap();

        // The root qualifies even when the liveness test rejects it
        let dead = DeadSet(vec![e[0], e[1]]);
        let parent = leaf.find_alive_parent(&dead).unwrap();
        assert!(parent.is_root());

        assert!(parent.find_alive_parent(&AllAlive).is_none());
    }

    #[test]
    fn test_descendants_order() {
        let (e, nodes) = two_by_three();
        let root = root_handle(&nodes).unwrap();
        let order: Vec<_> = root.descendants().map(|d| d.entity()).collect();
        assert_eq!(order, e[1..].to_vec());
    }

    #[test]
    fn test_leaf_range_may_start_anywhere() {
        let e = spawn_entities(4);
        // root -> (leaf, b), b -> c, with the leaf recording an empty range at 0
        let mut nodes = flatten(e[0], &[(e[1], e[0]), (e[2], e[0]), (e[3], e[2])]);
        nodes[1].first_child_index = 0;
        nodes[3].first_child_index = 0;
        let root = root_handle(&nodes).unwrap();

        assert_eq!(root.count_descendants(), 3);
        let levels: Vec<_> = root.descendant_levels().collect();
        assert_eq!(levels, vec![1..3, 3..4]);
        assert!(handle_at(&nodes, 1).unwrap().children().is_empty());
    }

    #[test]
    fn test_malformed_back_link_has_no_parent() {
        let e = spawn_entities(3);
        let mut nodes = flatten(e[0], &[(e[1], e[0]), (e[2], e[1])]);
        nodes[1].parent_index = 2;
        let a = handle_at(&nodes, 1).unwrap();

        assert!(a.structural_parent().is_none());
        assert!(a.find_alive_parent(&AllAlive).is_none());
        assert_eq!(handle_at(&nodes, 2).unwrap().find_alive_parent(&AllAlive), Some(a));
    }

    #[test]
    fn test_copy_parent_flag() {
        let e = spawn_entities(2);
        let mut nodes = flatten(e[0], &[(e[1], e[0])]);
        nodes[1].flags = NodeFlags::COPY_PARENT;

        assert!(handle_at(&nodes, 1).unwrap().is_copy_parent());
        assert!(!root_handle(&nodes).unwrap().is_copy_parent());
    }
}
