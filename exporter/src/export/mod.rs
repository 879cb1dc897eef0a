//! Scene export to the Bullet JSON document
//!
//! One pass over the scene in object order: every object with a rigid body
//! yields a rigid body record (plus hull or mesh geometry when requested),
//! every object with a constraint yields a constraint record. Geometry is
//! written once per mesh name no matter how many bodies share it.

mod constraint;
mod document;
pub mod offset;
pub mod records;
mod rigid_body;

pub use document::{BulletDocument, ExportSummary};
pub use offset::{decompose, offset_from_a_to_b, Offset};

use crate::config::ExportConfig;
use crate::core::SceneGraph;
use crate::geometry::GeometryError;
use crate::physics::{CollisionShape, RigidBody, RigidBodyConstraint};
use glam::Vec3;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Errors that abort an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Constraint '{constraint}' links {slot} to an object that is not in the scene")]
    InvalidReference {
        constraint: String,
        slot: &'static str,
    },

    #[error("Cannot compute constraint offset: object '{object}' has degenerate scale {scale}")]
    DivisionByZero { object: String, scale: Vec3 },

    #[error("Object '{object}' uses collision shape {shape:?} but has no mesh")]
    MissingGeometry {
        object: String,
        shape: CollisionShape,
    },

    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),

    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build the Bullet document for a scene
pub fn export_scene(
    graph: &SceneGraph,
    config: &ExportConfig,
) -> Result<BulletDocument, ExportError> {
    info!(
        objects = graph.world.len(),
        export_hulls = config.export_hulls,
        export_meshes = config.export_meshes,
        "Exporting scene"
    );

    let mut document = BulletDocument {
        gravity: graph.gravity.to_array(),
        ..Default::default()
    };
    let mut written = rigid_body::WrittenGeometry::default();

    for entity in graph.world.entities() {
        if let Ok(body) = graph.world.get::<RigidBody>(entity) {
            debug!(object = %graph.name(entity), shape = ?body.collision_shape, "Rigid body");
            document
                .rigid_bodys
                .push(rigid_body::rigid_body_record(graph, entity, &body, config));

            match body.collision_shape {
                CollisionShape::ConvexHull if config.export_hulls => {
                    if let Some(hull) = rigid_body::hull_record(graph, entity, &mut written)? {
                        document.convex_hulls.push(hull);
                    }
                }
                CollisionShape::Mesh if config.export_meshes => {
                    if let Some(mesh) = rigid_body::mesh_record(graph, entity, &mut written)? {
                        document.meshes.push(mesh);
                    }
                }
                _ => {}
            }
        }

        if let Ok(constraint) = graph.world.get::<RigidBodyConstraint>(entity) {
            debug!(
                object = %graph.name(entity),
                kind = ?constraint.kind.constraint_type(),
                "Constraint"
            );
            document
                .constraints
                .push(constraint::constraint_record(graph, entity, &constraint, config)?);
        }
    }

    info!(summary = %document.summary(), "Export complete");
    Ok(document)
}

/// Export a scene and write it to `path`
///
/// Nothing is written when the export fails.
pub fn export_to_file<P: AsRef<Path>>(
    graph: &SceneGraph,
    path: P,
    config: &ExportConfig,
) -> Result<ExportSummary, ExportError> {
    let document = export_scene(graph, config)?;
    document.save_to_file(path, config.pretty)?;
    Ok(document.summary())
}
