//! Flattened hierarchy store and navigation
//!
//! A hierarchy is a single array of [`HierarchyNode`]s owned by its root entity.
//! Index 0 is the root. Nodes are laid out breadth first, so the children of
//! every node occupy one contiguous range and the children of any contiguous
//! run of nodes are themselves contiguous. That property turns every subtree
//! walk into one range expansion per level.
//!
//! Building and rebuilding these arrays is the job of the parenting pass that
//! owns the logical parent/child graph; this module only reads them.

mod error;
mod handle;
mod node;
mod validate;

pub use error::HierarchyError;
pub use handle::{handle_at, root_handle, Children, DescendantLevels, HierarchyHandle};
pub use node::{HierarchyNode, NodeFlags};
pub use validate::validate_hierarchy;
