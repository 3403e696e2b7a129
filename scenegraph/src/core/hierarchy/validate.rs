//! Structural checks for hierarchy arrays

use super::error::HierarchyError;
use super::node::HierarchyNode;

/// Check the layout contract of a hierarchy array.
///
/// - the array has a root and the root is its own parent;
/// - non-empty child ranges tile `1..len` in index order, exactly once each
///   (a childless node's empty range may start anywhere);
/// - every child comes after its parent and links back to it.
///
/// Returns the first violation found.
pub fn validate_hierarchy(nodes: &[HierarchyNode]) -> Result<(), HierarchyError> {
    let Some(root) = nodes.first() else {
        return Err(HierarchyError::Empty);
    };
    if root.parent_index != 0 {
        return Err(HierarchyError::RootNotSelfParented {
            root: root.entity,
            parent_index: root.parent(),
        });
    }

    let len = nodes.len();
    let mut expected = 1;
    for (index, node) in nodes.iter().enumerate() {
        let range = node.children_range();
        if range.is_empty() {
            continue;
        }
        if range.start != expected {
            return Err(HierarchyError::NonContiguousChildren {
                entity: node.entity,
                index,
                first: range.start,
                expected,
            });
        }
        if range.end > len {
            return Err(HierarchyError::ChildRangeOutOfBounds {
                entity: node.entity,
                index,
                first: range.start,
                count: range.len(),
                len,
            });
        }
        if range.start <= index {
            return Err(HierarchyError::ChildNotAfterParent {
                entity: node.entity,
                index,
                child: range.start,
            });
        }
        for child in range.clone() {
            let child_node = &nodes[child];
            if child_node.parent() != index {
                return Err(HierarchyError::ParentMismatch {
                    entity: child_node.entity,
                    index: child,
                    parent_index: child_node.parent(),
                    expected: index,
                });
            }
        }
        expected = range.end;
    }

    if expected != len {
        return Err(HierarchyError::UncoveredNodes {
            covered: expected - 1,
            expected: len - 1,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flatten, spawn_entities};

    #[test]
    fn test_valid_hierarchy() {
        let e = spawn_entities(6);
        let nodes = flatten(
            e[0],
            &[
                (e[1], e[0]),
                (e[2], e[0]),
                (e[3], e[1]),
                (e[4], e[2]),
                (e[5], e[2]),
            ],
        );
        assert_eq!(validate_hierarchy(&nodes), Ok(()));
    }

    #[test]
    fn test_leaf_range_start_is_free() {
        let e = spawn_entities(4);
        let mut nodes = flatten(e[0], &[(e[1], e[0]), (e[2], e[0]), (e[3], e[2])]);
        nodes[1].first_child_index = 0;
        nodes[3].first_child_index = 17;
        assert_eq!(validate_hierarchy(&nodes), Ok(()));
    }

    #[test]
    fn test_single_root_is_valid() {
        let e = spawn_entities(1);
        assert_eq!(validate_hierarchy(&[HierarchyNode::root(e[0], 0)]), Ok(()));
    }

    #[test]
    fn test_empty_hierarchy() {
        assert_eq!(validate_hierarchy(&[]), Err(HierarchyError::Empty));
    }

    #[test]
    fn test_root_not_self_parented() {
        let e = spawn_entities(1);
        let mut root = HierarchyNode::root(e[0], 0);
        root.parent_index = 3;
        assert!(matches!(
            validate_hierarchy(&[root]),
            Err(HierarchyError::RootNotSelfParented { parent_index: 3, .. })
        ));
    }

    #[test]
    fn test_range_out_of_bounds() {
        let e = spawn_entities(2);
        let nodes = [HierarchyNode::root(e[0], 2), HierarchyNode::new(e[1], 0, 3, 0)];
        assert!(matches!(
            validate_hierarchy(&nodes),
            Err(HierarchyError::ChildRangeOutOfBounds { index: 0, count: 2, len: 2, .. })
        ));
    }

    #[test]
    fn test_overlapping_ranges() {
        let e = spawn_entities(4);
        // Both 1 and 2 claim index 3
        let nodes = [
            HierarchyNode::root(e[0], 2),
            HierarchyNode::new(e[1], 0, 3, 1),
            HierarchyNode::new(e[2], 0, 3, 1),
            HierarchyNode::new(e[3], 1, 4, 0),
        ];
        assert!(matches!(
            validate_hierarchy(&nodes),
            Err(HierarchyError::NonContiguousChildren { index: 2, first: 3, expected: 4, .. })
        ));
    }

    #[test]
    fn test_parent_mismatch() {
        let e = spawn_entities(3);
        let nodes = [
            HierarchyNode::root(e[0], 1),
            HierarchyNode::new(e[1], 0, 2, 1),
            HierarchyNode::new(e[2], 0, 3, 0),
        ];
        assert!(matches!(
            validate_hierarchy(&nodes),
            Err(HierarchyError::ParentMismatch { index: 2, parent_index: 0, expected: 1, .. })
        ));
    }

    #[test]
    fn test_uncovered_nodes() {
        let e = spawn_entities(3);
        let nodes = [
            HierarchyNode::root(e[0], 1),
            HierarchyNode::new(e[1], 0, 2, 0),
            HierarchyNode::new(e[2], 0, 2, 0),
        ];
        assert_eq!(
            validate_hierarchy(&nodes),
            Err(HierarchyError::UncoveredNodes {
                covered: 1,
                expected: 2
            })
        );
    }
}
