//! Hierarchy node record

use hecs::Entity;
use std::ops::Range;

bitflags::bitflags! {
    /// Per-node flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The node's absolute transform mirrors its parent and is written by
        /// another system; propagation never writes it.
        const COPY_PARENT = 0b0000_0001;
    }
}

/// One entity's slot in a flattened hierarchy array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HierarchyNode {
    /// Entity at this slot
    pub entity: Entity,
    /// Index of the structural parent; the root records 0
    pub parent_index: u32,
    /// Start of the contiguous child range. A childless node records where
    /// its children would start.
    pub first_child_index: u32,
    /// Number of children
    pub child_count: u32,
    /// Node flags
    pub flags: NodeFlags,
}

impl HierarchyNode {
    /// Create a node
    pub fn new(entity: Entity, parent_index: u32, first_child_index: u32, child_count: u32) -> Self {
        Self {
            entity,
            parent_index,
            first_child_index,
            child_count,
            flags: NodeFlags::empty(),
        }
    }

    /// Create the root node; its children always start at index 1
    pub fn root(entity: Entity, child_count: u32) -> Self {
        Self::new(entity, 0, 1, child_count)
    }

    /// Set the node flags
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Parent index as `usize`
    pub fn parent(&self) -> usize {
        self.parent_index as usize
    }

    /// Child index range
    pub fn children_range(&self) -> Range<usize> {
        let first = self.first_child_index as usize;
        first..first + self.child_count as usize
    }

    /// Whether the node is flagged [`NodeFlags::COPY_PARENT`]
    pub fn is_copy_parent(&self) -> bool {
        self.flags.contains(NodeFlags::COPY_PARENT)
    }
}
