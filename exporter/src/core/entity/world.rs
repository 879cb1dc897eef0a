//! World wrapper preserving object order

use super::components::Name;
use hecs::Entity;
use tracing::debug;

/// Wrapper around hecs::World that remembers spawn order
///
/// `hecs` iterates by archetype; the exporter must visit objects in the order
/// the host listed them, so every spawned entity is also recorded here.
pub struct World {
    inner: hecs::World,
    order: Vec<Entity>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
            order: Vec::new(),
        }
    }

    /// Spawn a new entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        let entity = self.inner.spawn(components);
        self.order.push(entity);
        debug!(entity = ?entity, index = self.order.len() - 1, "Spawned entity");
        entity
    }

    /// Get a reference to a component on an entity
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Check whether an entity carries a component
    pub fn has<T: hecs::Component>(&self, entity: Entity) -> bool {
        self.inner
            .entity(entity)
            .map(|e| e.has::<T>())
            .unwrap_or(false)
    }

    /// Insert a component into an entity
    pub fn insert_one(
        &mut self,
        entity: Entity,
        component: impl hecs::Component,
    ) -> Result<(), hecs::NoSuchEntity> {
        self.inner.insert_one(entity, component)
    }

    /// Check if an entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Iterate over entities in spawn order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    /// Number of entities in the world
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Human-readable label for an entity, used in logs and errors
    pub fn describe(&self, entity: Entity) -> String {
        match self.get::<Name>(entity) {
            Ok(name) => name.0.clone(),
            Err(_) => format!("{entity:?}"),
        }
    }
}
