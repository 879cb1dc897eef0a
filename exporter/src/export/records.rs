//! Records written to the Bullet document
//!
//! Field names and order match what the Bullet-side loader reads.

use crate::physics::{Axis, AxisLimit, AxisSpring, CollisionShape, ConstraintType};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One rigid body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RigidBodyRecord {
    pub name: String,
    pub location: [f32; 3],
    pub quaternion: [f32; 4],
    pub scale: [f32; 3],
    pub dimensions: [f32; 3],
    #[serde(rename = "static")]
    pub is_static: bool,
    pub kinematic: bool,
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
    pub collision_shape: CollisionShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hull_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh_name: Option<String>,
    pub use_margin: bool,
    pub collision_margin: f32,
    pub group: u32,
    pub mask: u32,
}

/// Vertices of one convex hull mesh
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HullRecord {
    pub hull_name: String,
    pub hull_points: Vec<[f32; 3]>,
}

/// One triangulated mesh
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MeshRecord {
    pub mesh_name: String,
    pub mesh_verts: Vec<[f32; 3]>,
    pub mesh_indices: Vec<u32>,
}

/// One constraint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConstraintRecord {
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,
    pub enabled: bool,
    pub disable_collisions: bool,
    pub breaking_threshold: f32,
    pub use_breaking: bool,
    pub use_override_solver_iterations: bool,
    pub solver_iterations: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_offset_a: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_offset_a: Option<[f32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_offset_b: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_offset_b: Option<[f32; 4]>,
    #[serde(flatten)]
    pub type_fields: TypeFields,
}

/// Kind-specific limit and spring keys of a constraint record
///
/// Written flat into the record as `use_limit_<axis>`, `limit_<axis>_lower`,
/// `limit_<axis>_upper` per limit and `use_spring_<axis>`,
/// `spring_stiffness_<axis>`, `spring_damping_<axis>` per spring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeFields {
    pub limits: Vec<(Axis, AxisLimit)>,
    pub springs: Vec<(Axis, AxisSpring)>,
}

impl Serialize for TypeFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some((self.limits.len() + self.springs.len()) * 3))?;
        for (axis, limit) in &self.limits {
            let key = axis.limit_key();
            map.serialize_entry(&format!("use_limit_{key}"), &limit.enabled)?;
            map.serialize_entry(&format!("limit_{key}_lower"), &limit.lower)?;
            map.serialize_entry(&format!("limit_{key}_upper"), &limit.upper)?;
        }
        for (axis, spring) in &self.springs {
            let key = axis.spring_key();
            map.serialize_entry(&format!("use_spring_{key}"), &spring.enabled)?;
            map.serialize_entry(&format!("spring_stiffness_{key}"), &spring.stiffness)?;
            map.serialize_entry(&format!("spring_damping_{key}"), &spring.damping)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_fields_flatten_into_record() {
        let record = ConstraintRecord {
            constraint_type: ConstraintType::Slider,
            enabled: true,
            disable_collisions: false,
            breaking_threshold: 10.0,
            use_breaking: false,
            use_override_solver_iterations: false,
            solver_iterations: 10,
            object1: None,
            translation_offset_a: None,
            rotation_offset_a: None,
            object2: Some("Rail".to_string()),
            translation_offset_b: Some([0.0, 1.0, 0.0]),
            rotation_offset_b: Some([0.0, 0.0, 0.0, 1.0]),
            type_fields: TypeFields {
                limits: vec![(Axis::LinX, AxisLimit::new(-2.0, 3.0))],
                springs: Vec::new(),
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "SLIDER");
        assert_eq!(value["use_limit_lin_x"], true);
        assert_eq!(value["limit_lin_x_lower"], -2.0);
        assert_eq!(value["limit_lin_x_upper"], 3.0);
        assert_eq!(value["object2"], "Rail");
        assert!(value.get("object1").is_none());
        assert!(value.get("translation_offset_a").is_none());
    }

    #[test]
    fn test_spring_keys() {
        let fields = TypeFields {
            limits: Vec::new(),
            springs: vec![
                (Axis::LinX, AxisSpring::new(5.0, 0.1)),
                (Axis::AngZ, AxisSpring::default()),
            ],
        };

        let json = serde_json::to_string(&fields).unwrap();
        let order: Vec<usize> = [
            "use_spring_x",
            "spring_stiffness_x",
            "spring_damping_x",
            "use_spring_ang_z",
            "spring_stiffness_ang_z",
            "spring_damping_ang_z",
        ]
        .iter()
        .map(|key| json.find(&format!("\"{key}\"")).unwrap())
        .collect();
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));

        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 6);
        assert_eq!(value["spring_stiffness_x"], 5.0);
        assert_eq!(value["use_spring_ang_z"], false);
    }

    #[test]
    fn test_rigid_body_record_keys() {
        let record = RigidBodyRecord {
            name: "Cube".to_string(),
            location: [0.0; 3],
            quaternion: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
            dimensions: [2.0; 3],
            is_static: true,
            kinematic: false,
            mass: 0.0,
            friction: 0.5,
            restitution: 0.0,
            collision_shape: CollisionShape::Box,
            hull_name: None,
            mesh_name: None,
            use_margin: false,
            collision_margin: 0.04,
            group: 1,
            mask: 1,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with(r#"{"name":"Cube","location":[0.0,0.0,0.0],"quaternion""#));
        assert!(json.contains(r#""static":true"#));
        assert!(json.contains(r#""collision_shape":"BOX""#));
        assert!(!json.contains("hull_name"));
    }
}
