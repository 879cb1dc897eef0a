//! Rigid body component as the host application describes it

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of collision collections a host body carries by default
pub const DEFAULT_COLLISION_COLLECTIONS: usize = 20;

/// Whether the simulation moves the body
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RigidBodyType {
    /// Dynamic body driven by the simulation
    #[default]
    Active,
    /// Static body; never moves
    Passive,
}

/// Collision shape kinds, written with the host's identifiers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollisionShape {
    Box,
    Sphere,
    Capsule,
    Cylinder,
    Cone,
    /// Hull around the vertices of the object's mesh
    #[default]
    ConvexHull,
    /// The object's mesh as a triangle soup
    Mesh,
    Compound,
}

/// Rigid body settings of one object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RigidBody {
    #[serde(rename = "type")]
    pub body_type: RigidBodyType,
    /// Animated by the host rather than simulated
    pub kinematic: bool,
    /// Mass in kilograms
    pub mass: f32,
    pub friction: f32,
    /// Bounciness
    pub restitution: f32,
    pub collision_shape: CollisionShape,
    pub use_margin: bool,
    pub collision_margin: f32,
    /// Collision collection membership; entry `i` sets bit `i` of the group
    pub collision_collections: Vec<bool>,
}

impl Default for RigidBody {
    fn default() -> Self {
        let mut collision_collections = vec![false; DEFAULT_COLLISION_COLLECTIONS];
        collision_collections[0] = true;
        Self {
            body_type: RigidBodyType::Active,
            kinematic: false,
            mass: 1.0,
            friction: 0.5,
            restitution: 0.0,
            collision_shape: CollisionShape::ConvexHull,
            use_margin: false,
            collision_margin: 0.04,
            collision_collections,
        }
    }
}

impl RigidBody {
    /// Create a dynamic body with the given mass
    pub fn active(mass: f32) -> Self {
        Self {
            mass,
            ..Default::default()
        }
    }

    /// Create a static body
    pub fn passive() -> Self {
        Self {
            body_type: RigidBodyType::Passive,
            ..Default::default()
        }
    }

    pub fn with_shape(mut self, shape: CollisionShape) -> Self {
        self.collision_shape = shape;
        self
    }

    /// Replace collection membership with exactly the given indices
    pub fn with_collections(mut self, enabled: &[usize]) -> Self {
        let len = enabled
            .iter()
            .map(|&i| i + 1)
            .max()
            .unwrap_or(0)
            .max(DEFAULT_COLLISION_COLLECTIONS);
        self.collision_collections = vec![false; len];
        for &i in enabled {
            self.collision_collections[i] = true;
        }
        self
    }

    pub fn is_static(&self) -> bool {
        self.body_type == RigidBodyType::Passive
    }

    /// Mass written to the export; static bodies are always massless
    pub fn effective_mass(&self) -> f32 {
        if self.is_static() {
            0.0
        } else {
            self.mass
        }
    }

    /// 32-bit collision group built from the enabled collections
    ///
    /// Collections beyond bit 31 cannot be represented and are dropped.
    pub fn collision_group(&self) -> u32 {
        let mut group = 0u32;
        for (i, &enabled) in self.collision_collections.iter().enumerate() {
            if !enabled {
                continue;
            }
            if i >= u32::BITS as usize {
                warn!(collection = i, "Collision collection does not fit in 32 bits, ignoring");
                continue;
            }
            group |= 1 << i;
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rigid_body_defaults() {
        let body = RigidBody::default();
        assert_eq!(body.body_type, RigidBodyType::Active);
        assert_eq!(body.collision_shape, CollisionShape::ConvexHull);
        assert_eq!(body.mass, 1.0);
        assert_eq!(body.collision_collections.len(), 20);
        assert_eq!(body.collision_group(), 1);
    }

    #[test]
    fn test_static_body_is_massless() {
        let body = RigidBody {
            mass: 25.0,
            ..RigidBody::passive()
        };
        assert!(body.is_static());
        assert_eq!(body.effective_mass(), 0.0);
        assert_eq!(RigidBody::active(3.5).effective_mass(), 3.5);
    }

    #[test]
    fn test_collision_group_bits() {
        let body = RigidBody::default().with_collections(&[0, 3, 19]);
        assert_eq!(body.collision_group(), 0b1000_0000_0000_0000_1001);

        let none = RigidBody::default().with_collections(&[]);
        assert_eq!(none.collision_group(), 0);

        let high = RigidBody::default().with_collections(&[31, 40]);
        assert_eq!(high.collision_group(), 1 << 31);
    }

    #[test]
    fn test_deserialize_host_identifiers() {
        let json = r#"{
            "type": "PASSIVE",
            "collision_shape": "CONVEX_HULL",
            "mass": 4.0,
            "collision_collections": [false, true]
        }"#;
        let body: RigidBody = serde_json::from_str(json).unwrap();
        assert!(body.is_static());
        assert_eq!(body.collision_shape, CollisionShape::ConvexHull);
        assert_eq!(body.friction, 0.5);
        assert_eq!(body.collision_group(), 0b10);
    }

    #[test]
    fn test_shape_serialization() {
        assert_eq!(
            serde_json::to_string(&CollisionShape::Mesh).unwrap(),
            "\"MESH\""
        );
        assert_eq!(
            serde_json::to_string(&CollisionShape::ConvexHull).unwrap(),
            "\"CONVEX_HULL\""
        );
    }
}
