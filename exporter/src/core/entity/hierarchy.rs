//! Hierarchy system for resolving world transforms from parent relationships

use super::components::{GlobalTransform, Parent, Transform};
use super::world::World;
use glam::Mat4;
use hecs::Entity;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Errors raised while resolving the transform hierarchy
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("Cyclic parent-child relationship involving '{0}'")]
    Cycle(String),

    #[error("Entity {0:?} disappeared before its global transform was stored")]
    MissingEntity(Entity),
}

/// Calculate a `GlobalTransform` for every entity.
///
/// Entities with a local `Transform` get `parent_world * local`. Entities that
/// only carry a `GlobalTransform` keep it as-is and act as fixed roots for
/// their children. Entities with neither get the identity.
pub fn update_hierarchy_system(world: &mut World) -> Result<(), HierarchyError> {
    let entities: Vec<Entity> = world.entities().collect();
    let mut resolved = HashMap::with_capacity(entities.len());
    let mut visiting = HashSet::new();

    for &entity in &entities {
        resolve(world, entity, &mut resolved, &mut visiting)?;
    }

    let mut updated = 0usize;
    for entity in entities {
        let needs_update =
            world.has::<Transform>(entity) || !world.has::<GlobalTransform>(entity);
        if !needs_update {
            continue;
        }
        let matrix = resolved.get(&entity).copied().unwrap_or(Mat4::IDENTITY);
        world
            .insert_one(entity, GlobalTransform::from_matrix(matrix))
            .map_err(|_| HierarchyError::MissingEntity(entity))?;
        updated += 1;
    }

    debug!(updated, "Updated global transforms");
    Ok(())
}

fn resolve(
    world: &World,
    entity: Entity,
    resolved: &mut HashMap<Entity, Mat4>,
    visiting: &mut HashSet<Entity>,
) -> Result<Mat4, HierarchyError> {
    if let Some(matrix) = resolved.get(&entity) {
        return Ok(*matrix);
    }

    let local = world.get::<Transform>(entity).ok().map(|t| *t);
    let matrix = match local {
        Some(local) => {
            let parent = world.get::<Parent>(entity).ok().map(|p| p.0);
            match parent {
                Some(parent) if world.contains(parent) => {
                    if !visiting.insert(entity) {
                        return Err(HierarchyError::Cycle(world.describe(entity)));
                    }
                    let parent_matrix = resolve(world, parent, resolved, visiting)?;
                    visiting.remove(&entity);
                    trace!(entity = ?entity, parent = ?parent, "Composed child transform");
                    parent_matrix * local.to_matrix()
                }
                _ => local.to_matrix(),
            }
        }
        None => world
            .get::<GlobalTransform>(entity)
            .map(|g| g.matrix)
            .unwrap_or(Mat4::IDENTITY),
    };

    resolved.insert(entity, matrix);
    Ok(matrix)
}
