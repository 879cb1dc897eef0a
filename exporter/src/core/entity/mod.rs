//! Entity-Component System (ECS) functionality
//!
//! Scene objects are entities in a `hecs` world; their transforms, names and
//! mesh links are plain components.

pub mod components;
pub mod hierarchy;
pub mod world;

// Re-export commonly used types
pub use components::{Dimensions, GlobalTransform, MeshRef, Name, Parent, ParentData, Transform};
pub use hierarchy::{update_hierarchy_system, HierarchyError};
pub use world::World;

// Re-export hecs types that users will need
pub use hecs::Entity;
