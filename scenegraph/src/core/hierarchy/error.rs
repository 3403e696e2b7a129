//! Contract violations detected on hierarchy arrays

use hecs::Entity;

/// A hierarchy array or command broke the layout contract
///
/// These are only produced while validation is enabled (see
/// [`Validation`](crate::config::Validation)); with validation off the arrays
/// are trusted and malformed entries are skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// The array has no root node
    #[error("hierarchy array is empty")]
    Empty,

    /// A command or lookup named an index past the end of the array
    #[error("index {index} is out of range for the hierarchy of {root:?} ({len} nodes)")]
    IndexOutOfRange {
        /// Root entity owning the array
        root: Entity,
        /// Offending index
        index: usize,
        /// Array length
        len: usize,
    },

    /// The root must record itself as its own parent
    #[error("root {root:?} records parent index {parent_index}, expected 0")]
    RootNotSelfParented {
        /// Root entity
        root: Entity,
        /// Recorded parent index
        parent_index: usize,
    },

    /// A child range extends past the end of the array
    #[error("children of {entity:?} at index {index} span {count} nodes from {first}, beyond length {len}")]
    ChildRangeOutOfBounds {
        /// Parent entity
        entity: Entity,
        /// Parent index
        index: usize,
        /// First child index
        first: usize,
        /// Child count
        count: usize,
        /// Array length
        len: usize,
    },

    /// Child ranges must tile the array in index order
    #[error("children of {entity:?} at index {index} start at {first}, expected {expected}")]
    NonContiguousChildren {
        /// Parent entity
        entity: Entity,
        /// Parent index
        index: usize,
        /// Recorded first child index
        first: usize,
        /// Where the range has to start
        expected: usize,
    },

    /// A child must come after its parent
    #[error("child index {child} of {entity:?} does not come after its parent index {index}")]
    ChildNotAfterParent {
        /// Parent entity
        entity: Entity,
        /// Parent index
        index: usize,
        /// Offending child index
        child: usize,
    },

    /// A child records a different parent than the range it sits in
    #[error("{entity:?} at index {index} records parent {parent_index}, but sits in the children of {expected}")]
    ParentMismatch {
        /// Child entity
        entity: Entity,
        /// Child index
        index: usize,
        /// Recorded parent index
        parent_index: usize,
        /// Index of the node whose range contains the child
        expected: usize,
    },

    /// The child ranges do not cover every non-root node
    #[error("child ranges cover {covered} nodes, expected {expected}")]
    UncoveredNodes {
        /// Nodes covered by child ranges
        covered: usize,
        /// Non-root nodes in the array
        expected: usize,
    },
}
