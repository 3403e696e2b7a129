//! Flattened transform hierarchies
//!
//! This crate stores each entity hierarchy as one breadth-first array per root
//! and propagates absolute-transform writes from any node to its descendants
//! in a single pass, preserving every descendant's placement relative to its
//! parent.
//!
//! The propagation engine is written once against the capability traits in
//! [`access`], so the same code runs against a whole `hecs::World`, against
//! narrow per-component lookups, or through a [`access::TransformBroker`].

// Lets the derive macro refer to `::scenegraph` from inside this crate.
extern crate self as scenegraph;

pub mod access;
pub mod config;
pub mod core;
pub mod propagation;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub mod prelude {
    // Entity system types
    pub use crate::core::entity::{
        locate, AbsoluteTransform, Entity, EntityInHierarchy, EntityInHierarchyCleanup,
        HierarchyLocation, RootReference, TickedWorldTransform, World, WorldTransform,
    };

    // Hierarchy types
    pub use crate::core::hierarchy::{
        handle_at, root_handle, validate_hierarchy, Children, HierarchyError, HierarchyHandle,
        HierarchyNode, NodeFlags,
    };

    // Math types
    pub use crate::core::math::{TransformDelta, TransformQvvs};
    pub use glam::{Quat, Vec3};

    // Access types
    pub use crate::access::{
        EntityExists, HasComponent, HierarchyBuffers, HierarchyLookup, HierarchyRef, Liveness,
        TransformAccess, TransformBroker, TransformLookup,
    };

    // Propagation types
    pub use crate::propagation::{
        apply_write, apply_write_with, write_and_propagate, Propagator, Space, TransformAspect,
        TransformWrite, WriteCommand,
    };

    // Config types
    pub use crate::config::{HierarchyConfig, Validation};
}

/// Initialize logging for the library
pub fn init_logging() {
    init_logging_with(None);
}

/// Initialize logging with an explicit filter, falling back to `RUST_LOG` and then `info`
pub fn init_logging_with(filter: Option<&str>) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = match filter {
        Some(filter) => tracing_subscriber::EnvFilter::new(filter),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into()),
    };

    // A subscriber may already be installed (tests, host application)
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
