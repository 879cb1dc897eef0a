//! Constraint records

use super::offset::offset_from_a_to_b;
use super::records::{ConstraintRecord, TypeFields};
use super::ExportError;
use crate::config::ExportConfig;
use crate::core::SceneGraph;
use crate::physics::RigidBodyConstraint;
use hecs::Entity;
use tracing::trace;

/// Name and frame offset of one linked object
struct LinkedObject {
    name: String,
    translation: [f32; 3],
    rotation: [f32; 4],
}

/// Flatten one object's constraint, including the frame offsets of its links
pub(super) fn constraint_record(
    graph: &SceneGraph,
    entity: Entity,
    constraint: &RigidBodyConstraint,
    config: &ExportConfig,
) -> Result<ConstraintRecord, ExportError> {
    let first = linked_object(graph, entity, constraint.object1, "object1", config)?;
    let second = linked_object(graph, entity, constraint.object2, "object2", config)?;
    let settings = &constraint.settings;

    let (object1, translation_offset_a, rotation_offset_a) = split(first);
    let (object2, translation_offset_b, rotation_offset_b) = split(second);

    Ok(ConstraintRecord {
        constraint_type: constraint.kind.constraint_type(),
        enabled: settings.enabled,
        disable_collisions: settings.disable_collisions,
        breaking_threshold: settings.breaking_threshold,
        use_breaking: settings.use_breaking,
        use_override_solver_iterations: settings.use_override_solver_iterations,
        solver_iterations: settings.solver_iterations,
        object1,
        translation_offset_a,
        rotation_offset_a,
        object2,
        translation_offset_b,
        rotation_offset_b,
        type_fields: TypeFields {
            limits: constraint.kind.limits(),
            springs: constraint.kind.springs(),
        },
    })
}

fn linked_object(
    graph: &SceneGraph,
    owner: Entity,
    reference: Option<Entity>,
    slot: &'static str,
    config: &ExportConfig,
) -> Result<Option<LinkedObject>, ExportError> {
    let Some(reference) = reference else {
        return Ok(None);
    };
    if !graph.world.contains(reference) {
        return Err(ExportError::InvalidReference {
            constraint: graph.name(owner),
            slot,
        });
    }

    let offset = offset_from_a_to_b(&graph.world_matrix(reference), &graph.world_matrix(owner))
        .map_err(|e| ExportError::DivisionByZero {
            object: graph.name(reference),
            scale: e.scale,
        })?;

    trace!(
        slot,
        reference = ?reference,
        translation = %offset.translation,
        "Computed constraint frame offset"
    );

    Ok(Some(LinkedObject {
        name: graph.name(reference),
        translation: offset.translation.to_array(),
        rotation: config.quaternion_order.components(offset.rotation),
    }))
}

fn split(linked: Option<LinkedObject>) -> (Option<String>, Option<[f32; 3]>, Option<[f32; 4]>) {
    match linked {
        Some(linked) => (
            Some(linked.name),
            Some(linked.translation),
            Some(linked.rotation),
        ),
        None => (None, None, None),
    }
}
