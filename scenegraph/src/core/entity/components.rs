//! Components for absolute transforms and hierarchy membership

use crate::core::hierarchy::{root_handle, HierarchyHandle, HierarchyNode};
use crate::core::math::TransformQvvs;
use glam::{Quat, Vec3};
use hecs::Entity;
use serde::{Deserialize, Serialize};

/// A component holding an absolute transform that propagation can write.
///
/// Implemented through `#[derive(AbsoluteTransform)]` for single-field structs.
/// The engine is generic over this trait, so every implementor propagates on
/// its own.
pub trait AbsoluteTransform: hecs::Component + Copy {
    /// Component name used in logs
    const NAME: &'static str;

    /// Current transform value
    fn transform(&self) -> TransformQvvs;

    /// Replace the transform value
    fn set_transform(&mut self, transform: TransformQvvs);

    /// Wrap a transform value
    fn from_transform(transform: TransformQvvs) -> Self;
}

/// Live absolute transform
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, scenegraph_derive::AbsoluteTransform,
)]
#[absolute_transform(name = "WorldTransform")]
pub struct WorldTransform(pub TransformQvvs);

impl WorldTransform {
    /// Create a world transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self(TransformQvvs::from_position(position))
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.0.position
    }

    /// World rotation
    pub fn rotation(&self) -> Quat {
        self.0.rotation
    }
}

/// Absolute transform as of the previous simulation tick, used for interpolation.
///
/// Propagates independently of [`WorldTransform`] under the same rules.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, scenegraph_derive::AbsoluteTransform,
)]
#[absolute_transform(name = "TickedWorldTransform")]
pub struct TickedWorldTransform(pub TransformQvvs);

impl TickedWorldTransform {
    /// Create a ticked transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self(TransformQvvs::from_position(position))
    }

    /// Ticked position
    pub fn position(&self) -> Vec3 {
        self.0.position
    }
}

/// Hierarchy buffer stored on a live root entity
///
/// Built by the parenting pass; read here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityInHierarchy(pub Vec<HierarchyNode>);

impl EntityInHierarchy {
    /// Wrap a flattened hierarchy array
    pub fn new(nodes: Vec<HierarchyNode>) -> Self {
        Self(nodes)
    }

    /// The hierarchy array
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.0
    }

    /// Handle to the root node
    pub fn root_handle(&self) -> Option<HierarchyHandle<'_>> {
        root_handle(&self.0)
    }
}

/// Copy of a root's hierarchy buffer retained after the root is destroyed,
/// so dependents can still resolve their position until they are released.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityInHierarchyCleanup(pub Vec<HierarchyNode>);

impl EntityInHierarchyCleanup {
    /// The hierarchy array
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.0
    }
}

impl From<&EntityInHierarchy> for EntityInHierarchyCleanup {
    fn from(live: &EntityInHierarchy) -> Self {
        Self(live.0.clone())
    }
}

/// Where a dependent entity sits: its root and its index in the root's array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootReference {
    /// Root entity owning the hierarchy array
    pub root: Entity,
    /// Index of the dependent's node
    pub index: u32,
}

impl RootReference {
    /// Create a root reference
    pub fn new(root: Entity, index: u32) -> Self {
        Self { root, index }
    }

    /// Index as `usize`
    pub fn index(&self) -> usize {
        self.index as usize
    }
}
