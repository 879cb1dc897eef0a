//! Physics data attached to scene objects
//!
//! These are the host's rigid body and constraint settings as plain
//! components. Nothing here simulates; the exporter only reads them.

pub mod components;
pub mod constraints;

// Re-export commonly used types
pub use components::{CollisionShape, RigidBody, RigidBodyType};
pub use constraints::{
    Axis, AxisLimit, AxisSpring, ConstraintData, ConstraintKind, ConstraintSettings,
    ConstraintType, RigidBodyConstraint, SixAxisLimits, SixAxisSprings,
};
