//! Mesh file loading utilities
//!
//! Supports loading polygon meshes from Wavefront OBJ files. Faces are kept
//! untriangulated so convex hulls see the authored vertices and the exporter
//! controls triangulation.

use super::MeshData;
use glam::Vec3;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Errors that can occur during mesh loading
#[derive(Debug, thiserror::Error)]
pub enum MeshLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ loading error: {0}")]
    ObjLoad(#[from] tobj::LoadError),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Mesh path escapes the asset root: {0:?}")]
    InvalidPath(PathBuf),

    #[error("No mesh data found in file")]
    NoMeshData,
}

/// Load a mesh from a file, naming it `name`
pub fn load_mesh_from_file(path: &Path, name: &str) -> Result<MeshData, MeshLoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "obj" => load_obj(path, name),
        ext => Err(MeshLoadError::UnsupportedFormat(ext.to_string())),
    }
}

/// Load every model of an OBJ file into one mesh
fn load_obj(path: &Path, name: &str) -> Result<MeshData, MeshLoadError> {
    info!("Loading OBJ file: {:?}", path);

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: false,
            single_index: true,
            ..Default::default()
        },
    )?;

    if models.is_empty() {
        return Err(MeshLoadError::NoMeshData);
    }

    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let base = vertices.len() as u32;

        vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );

        // tobj leaves face_arities empty when every face is a triangle
        if mesh.face_arities.is_empty() {
            faces.extend(
                mesh.indices
                    .chunks_exact(3)
                    .map(|tri| tri.iter().map(|i| base + i).collect::<Vec<u32>>()),
            );
        } else {
            let mut start = 0usize;
            for &arity in &mesh.face_arities {
                let end = start + arity as usize;
                let Some(face) = mesh.indices.get(start..end) else {
                    break;
                };
                faces.push(face.iter().map(|i| base + i).collect());
                start = end;
            }
        }

        debug!(
            "Loaded OBJ model '{}' with {} vertices and {} faces",
            model.name,
            mesh.positions.len() / 3,
            mesh.face_arities.len().max(mesh.indices.len() / 3)
        );
    }

    if vertices.is_empty() {
        return Err(MeshLoadError::NoMeshData);
    }

    Ok(MeshData::new(name, vertices, faces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD_AND_TRIANGLE: &str = "\
o Shape
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
f 1 2 3 4
f 1 2 5
";

    #[test]
    fn test_load_obj_keeps_polygons() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.obj");
        fs::write(&path, QUAD_AND_TRIANGLE).unwrap();

        let mesh = load_mesh_from_file(&path, "Shape").unwrap();
        assert_eq!(mesh.name, "Shape");
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.faces[0].len(), 4);
        assert_eq!(mesh.faces[1].len(), 3);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = load_mesh_from_file(Path::new("mesh.fbx"), "Mesh");
        assert!(matches!(result, Err(MeshLoadError::UnsupportedFormat(ext)) if ext == "fbx"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_mesh_from_file(&dir.path().join("missing.obj"), "Missing");
        assert!(result.is_err());
    }
}
