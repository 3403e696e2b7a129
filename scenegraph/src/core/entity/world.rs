//! World wrapper tying the entity store to hierarchy propagation

use super::components::{AbsoluteTransform, EntityInHierarchy, EntityInHierarchyCleanup};
use crate::config::HierarchyConfig;
use crate::core::hierarchy::{validate_hierarchy, HierarchyError, HierarchyNode};
use crate::propagation::{Propagator, Space, TransformAspect, TransformWrite};
use hecs::Entity;
use rayon::prelude::*;
use tracing::{debug, error, trace};

/// Wrapper around `hecs::World` carrying the hierarchy configuration
///
/// This is the whole-store access provider: it answers every capability the
/// propagation engine needs. Writes through it are not safe to run
/// concurrently on entities of the same hierarchy.
pub struct World {
    inner: hecs::World,
    config: HierarchyConfig,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::with_config(HierarchyConfig::default())
    }

    /// Create a new empty world with the given configuration
    pub fn with_config(config: HierarchyConfig) -> Self {
        debug!(validation = ?config.validation, "Creating World");
        Self {
            inner: hecs::World::new(),
            config,
        }
    }

    /// The hierarchy configuration
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Spawn a new entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        self.inner.spawn(components)
    }

    /// Get a reference to a component on an entity
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Insert a component into an entity
    pub fn insert_one(
        &mut self,
        entity: Entity,
        component: impl hecs::Component,
    ) -> Result<(), hecs::NoSuchEntity> {
        self.inner.insert_one(entity, component)
    }

    /// Remove a component from an entity
    pub fn remove_one<T: hecs::Component>(&mut self, entity: Entity) -> Result<T, hecs::ComponentError> {
        self.inner.remove_one::<T>(entity)
    }

    /// Despawn an entity and all its components
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    /// Check if an entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Get access to the inner hecs::World for advanced operations
    pub fn inner(&self) -> &hecs::World {
        &self.inner
    }

    /// Read and write `entity`'s `C` transform through the hierarchy
    pub fn transform_aspect<C: AbsoluteTransform>(
        &self,
        entity: Entity,
    ) -> TransformAspect<'_, C, hecs::World, hecs::World, hecs::World> {
        TransformAspect::new(&self.inner, entity).with_validation(self.config.validation)
    }

    /// Apply one write to `entity` and propagate it to its descendants.
    ///
    /// Returns the number of transforms written.
    pub fn apply_write<C: AbsoluteTransform>(
        &mut self,
        entity: Entity,
        space: Space,
        write: TransformWrite,
    ) -> Result<usize, HierarchyError> {
        let mut propagator = Propagator::new(self.config.clone());
        propagator.apply::<C, _, _, _>(&self.inner, &self.inner, &self.inner, entity, space, write)
    }

    /// Validate every live and cleanup hierarchy buffer, in parallel over roots.
    ///
    /// Returns the number of buffers checked, or the first violation found.
    pub fn validate_hierarchies(&self) -> Result<usize, HierarchyError> {
        let mut live = self.inner.query::<&EntityInHierarchy>();
        let mut cleanup = self.inner.query::<&EntityInHierarchyCleanup>();

        let buffers: Vec<(Entity, &[HierarchyNode])> = live
            .iter()
            .map(|(root, buffer)| (root, buffer.nodes()))
            .chain(cleanup.iter().map(|(root, buffer)| (root, buffer.nodes())))
            .collect();

        buffers.par_iter().try_for_each(|(root, nodes)| {
            validate_hierarchy(nodes).map_err(|err| {
                error!(root = ?root, error = %err, "Invalid hierarchy buffer");
                err
            })
        })?;

        trace!(count = buffers.len(), "Hierarchy validation passed");
        Ok(buffers.len())
    }
}
