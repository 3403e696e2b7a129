//! A single object multiplexing every capability behind declared permissions

use super::world_access::{hierarchy_of, read_transform, root_reference_of, write_transform};
use super::{HierarchyLookup, HierarchyRef, Liveness, TransformAccess};
use crate::core::entity::{AbsoluteTransform, RootReference};
use crate::core::math::TransformQvvs;
use hecs::Entity;
use std::any::TypeId;
use tracing::warn;

/// Combined provider for call sites that want one access object.
///
/// The broker declares up front which transform components it may read and
/// which it may write. Access to anything undeclared is refused and logged.
/// Hierarchy buffers, root references and liveness are always readable.
#[derive(Clone)]
pub struct TransformBroker<'w> {
    world: &'w hecs::World,
    readable: Vec<TypeId>,
    writable: Vec<TypeId>,
}

/// Builder declaring a [`TransformBroker`]'s permissions
#[derive(Debug, Clone)]
pub struct TransformBrokerBuilder<'w> {
    broker: TransformBroker<'w>,
}

impl std::fmt::Debug for TransformBroker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformBroker")
            .field("readable", &self.readable.len())
            .field("writable", &self.writable.len())
            .finish()
    }
}

impl<'w> TransformBroker<'w> {
    /// Start declaring a broker over `world`
    pub fn builder(world: &'w hecs::World) -> TransformBrokerBuilder<'w> {
        TransformBrokerBuilder {
            broker: TransformBroker {
                world,
                readable: Vec::new(),
                writable: Vec::new(),
            },
        }
    }

    /// Whether `C` was declared readable
    pub fn can_read<C: AbsoluteTransform>(&self) -> bool {
        self.readable.contains(&TypeId::of::<C>())
    }

    /// Whether `C` was declared writable
    pub fn can_write<C: AbsoluteTransform>(&self) -> bool {
        self.writable.contains(&TypeId::of::<C>())
    }
}

impl<'w> TransformBrokerBuilder<'w> {
    /// Allow reading `C`
    pub fn read<C: AbsoluteTransform>(mut self) -> Self {
        let id = TypeId::of::<C>();
        if !self.broker.readable.contains(&id) {
            self.broker.readable.push(id);
        }
        self
    }

    /// Allow reading and writing `C`
    pub fn read_write<C: AbsoluteTransform>(mut self) -> Self {
        let id = TypeId::of::<C>();
        if !self.broker.writable.contains(&id) {
            self.broker.writable.push(id);
        }
        self.read::<C>()
    }

    /// Finish the broker
    pub fn build(self) -> TransformBroker<'w> {
        self.broker
    }
}

impl Liveness for TransformBroker<'_> {
    fn is_alive(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }
}

impl HierarchyLookup for TransformBroker<'_> {
    fn hierarchy(&self, root: Entity) -> Option<HierarchyRef<'_>> {
        hierarchy_of(self.world, root)
    }

    fn root_reference(&self, entity: Entity) -> Option<RootReference> {
        root_reference_of(self.world, entity)
    }
}

impl<C: AbsoluteTransform> TransformAccess<C> for TransformBroker<'_> {
    fn read(&self, entity: Entity) -> Option<TransformQvvs> {
        if !self.can_read::<C>() {
            warn!(entity = ?entity, component = C::NAME, "Broker read refused: component not declared");
            return None;
        }
        read_transform::<C>(self.world, entity)
    }

    fn write(&self, entity: Entity, transform: TransformQvvs) -> bool {
        if !self.can_write::<C>() {
            warn!(entity = ?entity, component = C::NAME, "Broker write refused: component not declared writable");
            return false;
        }
        write_transform::<C>(self.world, entity, transform)
    }
}
