//! Bullet physics scene exporter
//!
//! This crate loads a scene snapshot (objects with transforms, rigid bodies,
//! constraints and mesh data), flattens the physics data into records and
//! writes a single JSON document for the Bullet physics engine.

pub mod config;
pub mod core;
pub mod export;
pub mod geometry;
pub mod io;
pub mod physics;

// Re-export commonly used types
pub mod prelude {
    // Entity system types
    pub use crate::core::entity::{
        update_hierarchy_system, Dimensions, Entity, GlobalTransform, MeshRef, Name, Parent,
        Transform, World,
    };
    pub use crate::core::SceneGraph;

    // Math types
    pub use glam::{Mat4, Quat, Vec3};

    // Geometry types
    pub use crate::geometry::{MeshData, MeshLibrary};

    // IO types
    pub use crate::io::{Scene, SceneError};

    // Config types
    pub use crate::config::{AssetConfig, ExportConfig, QuaternionOrder};

    // Physics types
    pub use crate::physics::{
        AxisLimit, AxisSpring, CollisionShape, ConstraintKind, ConstraintSettings, RigidBody,
        RigidBodyConstraint, RigidBodyType, SixAxisLimits, SixAxisSprings,
    };

    // Export types
    pub use crate::export::{export_scene, export_to_file, BulletDocument, ExportError};
}

/// Initialize logging for the exporter
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
