//! Entity-side data for hierarchies
//!
//! Components stored in the external `hecs` world: absolute transforms, the
//! per-root hierarchy buffers and the per-dependent position records, plus the
//! [`World`] wrapper that ties them to the propagation engine.

pub mod components;
pub mod locate;
pub mod world;

// Re-export commonly used types
pub use components::{
    AbsoluteTransform, EntityInHierarchy, EntityInHierarchyCleanup, RootReference,
    TickedWorldTransform, WorldTransform,
};
pub use locate::{locate, HierarchyLocation};
pub use scenegraph_derive::AbsoluteTransform;
pub use world::World;

// Re-export hecs types that users will need
pub use hecs::Entity;
