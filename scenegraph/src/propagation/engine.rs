//! The write/propagate engine
//!
//! One write lands on its target, then the subtree below is walked level by
//! level using the contiguous child ranges of the array. Each descendant keeps
//! its placement relative to its nearest live parent.

use super::command::WriteCommand;
use super::{Space, TransformWrite};
use crate::access::{HierarchyLookup, Liveness, TransformAccess};
use crate::config::HierarchyConfig;
use crate::core::entity::{locate, AbsoluteTransform};
use crate::core::hierarchy::{handle_at, validate_hierarchy, HierarchyError, HierarchyHandle, HierarchyNode};
use crate::core::math::TransformQvvs;
use hecs::Entity;
use tracing::{debug, trace};

/// A node's absolute transform before and after the current write
#[derive(Debug, Clone, Copy)]
struct Placement {
    old: TransformQvvs,
    new: TransformQvvs,
}

impl Placement {
    fn unchanged(transform: TransformQvvs) -> Self {
        Self {
            old: transform,
            new: transform,
        }
    }

    /// Move a child that was at `old` along with this parent
    fn carry(&self, old: &TransformQvvs) -> TransformQvvs {
        self.new.mul(&self.old.inverse_mul(old))
    }
}

/// Applies write commands to hierarchy arrays and propagates them downwards
///
/// Holds the configuration and scratch buffers reused between calls, so one
/// propagator per worker avoids reallocating per write.
#[derive(Debug, Default)]
pub struct Propagator {
    config: HierarchyConfig,
    parents: Vec<Placement>,
    current: Vec<Placement>,
}

impl Propagator {
    /// Create a propagator with the given configuration
    pub fn new(config: HierarchyConfig) -> Self {
        trace!(validation = ?config.validation, "Creating Propagator");
        Self {
            config,
            parents: Vec::new(),
            current: Vec::new(),
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Apply `commands` in order to `hierarchy`, propagating each one to the
    /// target's descendants before the next command runs.
    ///
    /// Copy-parent targets are skipped without reading or writing anything.
    /// With validation enabled the array is checked first and an out-of-range
    /// target is an error; otherwise such targets are skipped.
    ///
    /// Returns the number of transforms written.
    pub fn write_and_propagate<C, T, L>(
        &mut self,
        hierarchy: &[HierarchyNode],
        commands: &[WriteCommand],
        transforms: &T,
        liveness: &L,
    ) -> Result<usize, HierarchyError>
    where
        C: AbsoluteTransform,
        T: TransformAccess<C> + ?Sized,
        L: Liveness + ?Sized,
    {
        let validate = self.config.validation.enabled();
        if validate && !commands.is_empty() {
            validate_hierarchy(hierarchy)?;
        }

        let mut written = 0;
        for command in commands {
            let index = command.index as usize;
            let Some(target) = handle_at(hierarchy, index) else {
                if validate {
                    return Err(match hierarchy.first() {
                        Some(root) => HierarchyError::IndexOutOfRange {
                            root: root.entity,
                            index,
                            len: hierarchy.len(),
                        },
                        None => HierarchyError::Empty,
                    });
                }
                debug!(index, len = hierarchy.len(), "Skipping write outside the hierarchy");
                continue;
            };
            written += self.write_one::<C, T, L>(target, command, transforms, liveness);
        }
        Ok(written)
    }

    /// Resolve `entity` through `hierarchies` and apply one write to it.
    ///
    /// An entity in no hierarchy is its own root: the write is resolved with
    /// local space equal to world space and nothing propagates.
    pub fn apply<C, H, T, L>(
        &mut self,
        hierarchies: &H,
        transforms: &T,
        liveness: &L,
        entity: Entity,
        space: Space,
        write: TransformWrite,
    ) -> Result<usize, HierarchyError>
    where
        C: AbsoluteTransform,
        H: HierarchyLookup + ?Sized,
        T: TransformAccess<C> + ?Sized,
        L: Liveness + ?Sized,
    {
        match locate(hierarchies, entity) {
            Some(location) => {
                let command = WriteCommand::new(location.index() as u32, space, write);
                self.write_and_propagate::<C, T, L>(
                    location.nodes(),
                    std::slice::from_ref(&command),
                    transforms,
                    liveness,
                )
            }
            None => {
                let Some(current) = transforms.read(entity) else {
                    debug!(entity = ?entity, component = C::NAME, "Write target has no transform");
                    return Ok(0);
                };
                let new = WriteCommand::new(0, space, write).resolve(&current, None);
                Ok(usize::from(transforms.write(entity, new)))
            }
        }
    }

    fn write_one<C, T, L>(
        &mut self,
        target: HierarchyHandle<'_>,
        command: &WriteCommand,
        transforms: &T,
        liveness: &L,
    ) -> usize
    where
        C: AbsoluteTransform,
        T: TransformAccess<C> + ?Sized,
        L: Liveness + ?Sized,
    {
        let entity = target.entity();
        if target.is_copy_parent() {
            trace!(entity = ?entity, index = target.index(), "Skipping copy-parent target");
            return 0;
        }
        let Some(old) = transforms.read(entity) else {
            debug!(entity = ?entity, component = C::NAME, "Write target has no transform");
            return 0;
        };

        let parent = target
            .find_alive_parent(liveness)
            .and_then(|parent| transforms.read(parent.entity()));
        let new = command.resolve(&old, parent.as_ref());

        let mut written = usize::from(transforms.write(entity, new));
        written += self.propagate::<C, T, L>(target, Placement { old, new }, transforms, liveness);

        trace!(
            entity = ?entity,
            index = target.index(),
            component = C::NAME,
            written,
            "Propagated write"
        );
        written
    }

    fn propagate<C, T, L>(
        &mut self,
        target: HierarchyHandle<'_>,
        placement: Placement,
        transforms: &T,
        liveness: &L,
    ) -> usize
    where
        C: AbsoluteTransform,
        T: TransformAccess<C> + ?Sized,
        L: Liveness + ?Sized,
    {
        let hierarchy = target.hierarchy();
        let mut parent_level = target.index()..target.index() + 1;
        let mut written = 0;

        self.parents.clear();
        self.parents.push(placement);

        for level in target.descendant_levels() {
            self.current.clear();
            for index in level.clone() {
                let node = &hierarchy[index];
                let parent_index = node.parent();
                let placement = if parent_level.contains(&parent_index) {
                    let parent = self.parents[parent_index - parent_level.start];
                    place::<C, T, L>(node, &parent, transforms, liveness, &mut written)
                } else {
                    // Only reachable on arrays that skipped validation
                    debug!(entity = ?node.entity, index, parent_index, "Parent outside level, leaving subtree in place");
                    Placement::unchanged(TransformQvvs::IDENTITY)
                };
                self.current.push(placement);
            }
            std::mem::swap(&mut self.parents, &mut self.current);
            parent_level = level;
        }
        written
    }
}

/// Recompute one descendant and return the placement its children follow
fn place<C, T, L>(
    node: &HierarchyNode,
    parent: &Placement,
    transforms: &T,
    liveness: &L,
    written: &mut usize,
) -> Placement
where
    C: AbsoluteTransform,
    T: TransformAccess<C> + ?Sized,
    L: Liveness + ?Sized,
{
    // Dead nodes are transparent: their children graft onto the parent
    if !liveness.is_alive(node.entity) {
        return *parent;
    }
    let Some(old) = transforms.read(node.entity) else {
        return *parent;
    };
    // Owned elsewhere; children stay relative to its current value
    if node.is_copy_parent() {
        return Placement::unchanged(old);
    }
    let new = parent.carry(&old);
    if transforms.write(node.entity, new) {
        *written += 1;
    }
    Placement { old, new }
}
