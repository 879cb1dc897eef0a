//! Mesh data shared between scene objects
//!
//! Meshes are polygonal: each face is a loop of vertex indices of any arity.
//! Convex hulls are exported from the raw vertex list; triangle meshes go
//! through [`triangulate`] first.

mod obj_loader;
mod triangulate;

pub use obj_loader::{load_mesh_from_file, MeshLoadError};
pub use triangulate::{triangulate, TriangleMesh};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Errors raised by malformed mesh data
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("Mesh '{mesh}': face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        mesh: String,
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// A named polygon mesh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshData {
    pub name: String,
    /// Vertex positions in object space
    pub vertices: Vec<Vec3>,
    /// Face loops as indices into `vertices`
    #[serde(default)]
    pub faces: Vec<Vec<u32>>,
}

impl MeshData {
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
        }
    }

    /// Axis-aligned box centred on the origin, built from quads
    pub fn cuboid(name: impl Into<String>, half_extents: Vec3) -> Self {
        let h = half_extents;
        let vertices = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        let faces = vec![
            vec![0, 3, 2, 1], // bottom
            vec![4, 5, 6, 7], // top
            vec![0, 1, 5, 4], // front
            vec![1, 2, 6, 5], // right
            vec![2, 3, 7, 6], // back
            vec![3, 0, 4, 7], // left
        ];
        Self::new(name, vertices, faces)
    }

    /// Check that every face index points at an existing vertex
    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertex_count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(GeometryError::IndexOutOfRange {
                    mesh: self.name.clone(),
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Local-space bounding box, or `None` for a mesh without vertices
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
        )
    }

    /// Size of the local bounding box
    pub fn size(&self) -> Vec3 {
        self.bounds()
            .map(|(min, max)| max - min)
            .unwrap_or(Vec3::ZERO)
    }
}

/// Meshes of a scene, keyed by name
#[derive(Debug, Default)]
pub struct MeshLibrary {
    meshes: HashMap<String, MeshData>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh, returning the previous mesh with the same name
    pub fn insert(&mut self, mesh: MeshData) -> Option<MeshData> {
        debug!(
            mesh_name = %mesh.name,
            vertices = mesh.vertices.len(),
            faces = mesh.faces.len(),
            "Registered mesh"
        );
        self.meshes.insert(mesh.name.clone(), mesh)
    }

    pub fn get(&self, name: &str) -> Option<&MeshData> {
        self.meshes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_bounds() {
        let mesh = MeshData::cuboid("Box", Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.faces.len(), 6);
        assert_eq!(mesh.size(), Vec3::new(2.0, 4.0, 6.0));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_empty_mesh_size() {
        let mesh = MeshData::new("Empty", Vec::new(), Vec::new());
        assert!(mesh.bounds().is_none());
        assert_eq!(mesh.size(), Vec3::ZERO);
    }

    #[test]
    fn test_validate_rejects_bad_index() {
        let mesh = MeshData::new(
            "Broken",
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![vec![0, 1, 2], vec![0, 2, 7]],
        );
        match mesh.validate() {
            Err(GeometryError::IndexOutOfRange { face, index, .. }) => {
                assert_eq!(face, 1);
                assert_eq!(index, 7);
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_library_replaces_same_name() {
        let mut library = MeshLibrary::new();
        assert!(library.insert(MeshData::cuboid("Cube", Vec3::ONE)).is_none());
        assert!(library.insert(MeshData::cuboid("Cube", Vec3::ONE)).is_some());
        assert_eq!(library.len(), 1);
        assert!(library.contains("Cube"));
        assert!(library.get("Sphere").is_none());
    }

    #[test]
    fn test_mesh_data_faces_default() {
        let json = r#"{"name":"Points","vertices":[[0,0,0],[1,0,0]]}"#;
        let mesh: MeshData = serde_json::from_str(json).unwrap();
        assert!(mesh.faces.is_empty());
        assert_eq!(mesh.vertices[1], Vec3::X);
    }
}
