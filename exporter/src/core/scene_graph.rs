//! Read-only scene snapshot handed to the exporter

use super::entity::{
    update_hierarchy_system, Dimensions, GlobalTransform, HierarchyError, MeshRef, World,
};
use crate::geometry::{MeshData, MeshLibrary};
use glam::{Mat4, Vec3};
use hecs::Entity;

/// Gravity used when a scene does not specify one (Z-up, m/s²)
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, 0.0, -9.81);

/// Objects, shared mesh data and scene-wide settings
pub struct SceneGraph {
    pub world: World,
    pub meshes: MeshLibrary,
    pub gravity: Vec3,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl SceneGraph {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            world: World::new(),
            meshes: MeshLibrary::new(),
            gravity,
        }
    }

    /// Recompute world matrices after objects were added or re-parented
    pub fn update_transforms(&mut self) -> Result<(), HierarchyError> {
        update_hierarchy_system(&mut self.world)
    }

    /// Object name, falling back to the entity id for unnamed objects
    pub fn name(&self, entity: Entity) -> String {
        self.world.describe(entity)
    }

    /// World matrix of an object
    pub fn world_matrix(&self, entity: Entity) -> Mat4 {
        self.world
            .get::<GlobalTransform>(entity)
            .map(|g| g.matrix)
            .unwrap_or(Mat4::IDENTITY)
    }

    /// Mesh linked to an object, if any
    pub fn mesh_of(&self, entity: Entity) -> Option<&MeshData> {
        let mesh_ref = self.world.get::<MeshRef>(entity).ok()?;
        self.meshes.get(&mesh_ref.0)
    }

    /// Name of the mesh linked to an object, whether or not it is loaded
    pub fn mesh_name(&self, entity: Entity) -> Option<String> {
        self.world.get::<MeshRef>(entity).ok().map(|m| m.0.clone())
    }

    /// Bounding dimensions of an object in world units
    ///
    /// Host-provided `Dimensions` win; otherwise the local mesh bounds are
    /// scaled by the object's world scale. Objects without either are zero.
    pub fn dimensions(&self, entity: Entity) -> Vec3 {
        if let Ok(dimensions) = self.world.get::<Dimensions>(entity) {
            return dimensions.0;
        }
        let Some(mesh) = self.mesh_of(entity) else {
            return Vec3::ZERO;
        };
        let (scale, _, _) = self.world_matrix(entity).to_scale_rotation_translation();
        mesh.size() * scale.abs()
    }
}
