//! Resolving an entity to its place in a hierarchy

use crate::access::{HierarchyLookup, HierarchyRef};
use crate::core::hierarchy::{HierarchyHandle, HierarchyNode};
use hecs::Entity;
use tracing::debug;

/// An entity's hierarchy array together with its index in it
///
/// Holds the lookup's borrow of the array for as long as it lives.
pub struct HierarchyLocation<'w> {
    hierarchy: HierarchyRef<'w>,
    root: Entity,
    index: usize,
}

impl std::fmt::Debug for HierarchyLocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyLocation")
            .field("root", &self.root)
            .field("index", &self.index)
            .field("cleanup", &self.hierarchy.is_cleanup())
            .finish()
    }
}

impl<'w> HierarchyLocation<'w> {
    /// Root entity owning the array
    pub fn root(&self) -> Entity {
        self.root
    }

    /// Index of the located entity
    pub fn index(&self) -> usize {
        self.index
    }

    /// The whole array
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.hierarchy
    }

    /// Whether the array is the cleanup copy of a destroyed root
    pub fn is_cleanup(&self) -> bool {
        self.hierarchy.is_cleanup()
    }

    /// Handle to the located node
    pub fn handle(&self) -> HierarchyHandle<'_> {
        // locate() only builds locations with an in-range index
        HierarchyHandle::from_parts(&self.hierarchy, self.index)
    }
}

/// Find where `entity` sits in a hierarchy.
///
/// Dependents resolve through their [`RootReference`](super::RootReference),
/// falling back to the root's cleanup buffer once the root is destroyed. An
/// entity with its own hierarchy buffer is a root at index 0. Anything else is
/// standalone and yields `None`: such an entity is its own root and its local
/// space is world space.
pub fn locate<H: HierarchyLookup + ?Sized>(lookup: &H, entity: Entity) -> Option<HierarchyLocation<'_>> {
    if let Some(reference) = lookup.root_reference(entity) {
        let hierarchy = lookup.hierarchy(reference.root)?;
        let index = reference.index();
        if hierarchy.get(index).map(|node| node.entity) != Some(entity) {
            debug!(
                entity = ?entity,
                root = ?reference.root,
                index,
                "Root reference does not point back at entity"
            );
            return None;
        }
        return Some(HierarchyLocation {
            hierarchy,
            root: reference.root,
            index,
        });
    }

    let hierarchy = lookup.hierarchy(entity)?;
    if hierarchy.is_empty() {
        return None;
    }
    Some(HierarchyLocation {
        hierarchy,
        root: entity,
        index: 0,
    })
}
