//! Core components for scene objects

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Transform component representing position, rotation, and scale relative to the parent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,
    /// Rotation relative to the parent as a quaternion
    pub rotation: Quat,
    /// Scale relative to the parent
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with the given position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert this transform to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Set the scale of the transform
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Global transform component holding the world-space transformation matrix
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GlobalTransform {
    /// World-space transformation matrix
    pub matrix: Mat4,
}

impl Default for GlobalTransform {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }
}

impl GlobalTransform {
    /// Create a new global transform from a matrix
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Get the world position from the transformation matrix
    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }
}

impl From<Transform> for GlobalTransform {
    fn from(transform: Transform) -> Self {
        Self::from_matrix(transform.to_matrix())
    }
}

/// Parent component establishing a parent-child relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub hecs::Entity);

/// Serializable data for the Parent component
///
/// The entity_id is the index of the parent in the scene file and is
/// remapped to a live entity during instantiation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParentData {
    pub entity_id: u64,
}

impl ParentData {
    /// Try to convert ParentData back to Parent using an entity mapper
    pub fn try_to_parent<F>(&self, entity_mapper: F) -> Option<Parent>
    where
        F: Fn(u64) -> Option<hecs::Entity>,
    {
        entity_mapper(self.entity_id).map(Parent)
    }
}

/// Name component identifying an object in the exported document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    /// Create a new name component
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Bounding dimensions reported by the host for an object
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dimensions(pub Vec3);

/// Link from an object to a named mesh in the scene's mesh library
///
/// Several objects may share one mesh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeshRef(pub String);

impl MeshRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_default() {
        let transform = Transform::default();
        assert_eq!(transform.position, Vec3::ZERO);
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_transform_to_matrix() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        let matrix = transform.to_matrix();
        assert_eq!(matrix.w_axis.truncate(), transform.position);
        assert_eq!(matrix.x_axis.x, 2.0);
    }

    #[test]
    fn test_global_transform_position() {
        let transform = Transform::from_position(Vec3::new(5.0, 10.0, 15.0));
        let global = GlobalTransform::from(transform);
        assert_eq!(global.position(), Vec3::new(5.0, 10.0, 15.0));
    }

    #[test]
    fn test_transform_deserializes_from_arrays() {
        let json = r#"{"position":[1,2,3],"rotation":[0,0,0,1],"scale":[1,1,2]}"#;
        let transform: Transform = serde_json::from_str(json).unwrap();
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_name_component() {
        let name = Name::new("Cube.001");
        assert_eq!(name.0, "Cube.001");

        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Cube.001\"");
        let deserialized: Name = serde_json::from_str(&json).unwrap();
        assert_eq!(name, deserialized);
    }
}
