//! Rigid body records and their collision geometry

use super::offset::decompose;
use super::records::{HullRecord, MeshRecord, RigidBodyRecord};
use super::ExportError;
use crate::config::ExportConfig;
use crate::core::SceneGraph;
use crate::geometry::{triangulate, MeshData};
use crate::physics::{CollisionShape, RigidBody};
use hecs::Entity;
use std::collections::HashSet;
use tracing::debug;

/// Mesh names already written during one export
#[derive(Debug, Default)]
pub(super) struct WrittenGeometry {
    hulls: HashSet<String>,
    meshes: HashSet<String>,
}

/// Flatten one object's rigid body settings
pub(super) fn rigid_body_record(
    graph: &SceneGraph,
    entity: Entity,
    body: &RigidBody,
    config: &ExportConfig,
) -> RigidBodyRecord {
    let transform = decompose(&graph.world_matrix(entity));
    let mesh_name = graph.mesh_name(entity);
    let group = body.collision_group();

    RigidBodyRecord {
        name: graph.name(entity),
        location: transform.translation.to_array(),
        quaternion: config.quaternion_order.components(transform.rotation),
        scale: transform.scale.to_array(),
        dimensions: graph.dimensions(entity).to_array(),
        is_static: body.is_static(),
        kinematic: body.kinematic,
        mass: body.effective_mass(),
        friction: body.friction,
        restitution: body.restitution,
        collision_shape: body.collision_shape,
        hull_name: mesh_name
            .clone()
            .filter(|_| body.collision_shape == CollisionShape::ConvexHull),
        mesh_name: mesh_name.filter(|_| body.collision_shape == CollisionShape::Mesh),
        use_margin: body.use_margin,
        collision_margin: body.collision_margin,
        // Group and mask are deliberately the same value
        group,
        mask: group,
    }
}

/// Convex hull for the object's mesh, unless that mesh was already written
pub(super) fn hull_record(
    graph: &SceneGraph,
    entity: Entity,
    written: &mut WrittenGeometry,
) -> Result<Option<HullRecord>, ExportError> {
    let mesh = required_mesh(graph, entity, CollisionShape::ConvexHull)?;
    if !written.hulls.insert(mesh.name.clone()) {
        debug!(mesh_name = %mesh.name, "Convex hull already exported");
        return Ok(None);
    }

    Ok(Some(HullRecord {
        hull_name: mesh.name.clone(),
        hull_points: mesh.vertices.iter().map(|v| v.to_array()).collect(),
    }))
}

/// Triangulated mesh for the object, unless that mesh was already written
pub(super) fn mesh_record(
    graph: &SceneGraph,
    entity: Entity,
    written: &mut WrittenGeometry,
) -> Result<Option<MeshRecord>, ExportError> {
    let mesh = required_mesh(graph, entity, CollisionShape::Mesh)?;
    if written.meshes.contains(&mesh.name) {
        debug!(mesh_name = %mesh.name, "Triangle mesh already exported");
        return Ok(None);
    }

    let triangles = triangulate(mesh)?;
    written.meshes.insert(mesh.name.clone());

    Ok(Some(MeshRecord {
        mesh_name: mesh.name.clone(),
        mesh_verts: triangles.vertices.iter().map(|v| v.to_array()).collect(),
        mesh_indices: triangles.indices,
    }))
}

fn required_mesh(
    graph: &SceneGraph,
    entity: Entity,
    shape: CollisionShape,
) -> Result<&MeshData, ExportError> {
    graph
        .mesh_of(entity)
        .ok_or_else(|| ExportError::MissingGeometry {
            object: graph.name(entity),
            shape,
        })
}
