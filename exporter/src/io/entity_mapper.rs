//! Entity ID mapping for scene loading

use hecs::Entity;
use std::collections::HashMap;
use tracing::trace;

/// Maps scene-file object ids to the entities spawned for them
///
/// Object ids are positions in the scene's `entities` array. Parent links and
/// constraint object references are stored as ids and resolved through this
/// mapper once every object has been spawned.
#[derive(Debug, Default)]
pub struct EntityMapper {
    mapping: HashMap<u64, Entity>,
}

impl EntityMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping from a scene-file id to a spawned entity
    pub fn register(&mut self, old_id: u64, new_entity: Entity) {
        trace!(old_id = old_id, new_entity = ?new_entity, "Registering entity mapping");
        self.mapping.insert(old_id, new_entity);
    }

    /// Look up the entity spawned for a scene-file id
    pub fn remap(&self, old_id: u64) -> Option<Entity> {
        self.mapping.get(&old_id).copied()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_mapper_basic() {
        let mut mapper = EntityMapper::new();
        assert!(mapper.is_empty());

        let entity = Entity::DANGLING;
        mapper.register(42, entity);

        assert_eq!(mapper.len(), 1);
        assert_eq!(mapper.remap(42), Some(entity));
        assert_eq!(mapper.remap(99), None);
    }

    #[test]
    fn test_entity_mapper_overwrite() {
        let mut world = hecs::World::new();
        let first = world.spawn(());
        let second = world.spawn(());

        let mut mapper = EntityMapper::new();
        mapper.register(1, first);
        mapper.register(1, second);

        assert_eq!(mapper.len(), 1);
        assert_eq!(mapper.remap(1), Some(second));
    }
}
