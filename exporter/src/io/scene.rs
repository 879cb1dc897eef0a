//! Scene snapshot serialization and loading

use crate::config::AssetConfig;
use crate::core::entity::{
    Dimensions, Entity, GlobalTransform, HierarchyError, MeshRef, Name, ParentData, Transform,
    World,
};
use crate::core::{SceneGraph, DEFAULT_GRAVITY};
use crate::geometry::{load_mesh_from_file, GeometryError, MeshData, MeshLibrary, MeshLoadError};
use crate::physics::{ConstraintData, RigidBody};
use glam::Vec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::entity_mapper::EntityMapper;

/// Scene snapshot: gravity, shared meshes and serialized objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default = "default_gravity")]
    pub gravity: Vec3,
    #[serde(default)]
    pub meshes: Vec<SerializedMesh>,
    /// Objects in host order; an object's id is its index here
    pub entities: Vec<SerializedEntity>,
}

fn default_gravity() -> Vec3 {
    DEFAULT_GRAVITY
}

/// A single serialized object with its components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerializedEntity {
    /// Map of component type names to their serialized JSON values
    pub components: HashMap<String, serde_json::Value>,
}

/// Mesh entry of a scene file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerializedMesh {
    /// Vertices and faces stored in the scene file
    Inline(MeshData),
    /// Mesh file relative to the asset root
    File { name: String, path: PathBuf },
}

impl SerializedMesh {
    pub fn name(&self) -> &str {
        match self {
            SerializedMesh::Inline(mesh) => &mesh.name,
            SerializedMesh::File { name, .. } => name,
        }
    }
}

/// Errors that can occur during scene operations
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Component error: {0}")]
    ComponentError(String),

    #[error("Entity with ID {0} not found")]
    EntityNotFound(u64),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("Failed to load mesh '{name}': {source}")]
    MeshLoad {
        name: String,
        #[source]
        source: MeshLoadError,
    },

    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),

    #[error("Mesh '{0}' is not defined in the scene")]
    MeshNotFound(String),

    #[error("Mesh '{0}' is defined more than once")]
    DuplicateMesh(String),
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            meshes: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Build the in-memory scene graph, resolving mesh files and object links
    pub fn instantiate(&self, assets: &AssetConfig) -> Result<SceneGraph, SceneError> {
        let mut graph = SceneGraph::new(self.gravity);
        self.load_meshes(assets, &mut graph.meshes)?;

        let mut mapper = EntityMapper::new();
        let mut entities_to_build = Vec::with_capacity(self.entities.len());

        info!(
            entity_count = self.entities.len(),
            mesh_count = graph.meshes.len(),
            "Instantiating scene"
        );

        // First pass: spawn all entities so links can point forward
        for (id, serialized_entity) in self.entities.iter().enumerate() {
            let entity = graph.world.spawn(());
            mapper.register(id as u64, entity);
            entities_to_build.push((id as u64, entity, serialized_entity));
        }

        // Second pass: add components with remapping
        for (id, entity, serialized_entity) in entities_to_build {
            for (component_type, value) in &serialized_entity.components {
                let world = &mut graph.world;
                match component_type.as_str() {
                    "Name" => insert(world, id, entity, parse::<Name>(id, component_type, value)?)?,
                    "Transform" => {
                        insert(world, id, entity, parse::<Transform>(id, component_type, value)?)?
                    }
                    "GlobalTransform" => insert(
                        world,
                        id,
                        entity,
                        parse::<GlobalTransform>(id, component_type, value)?,
                    )?,
                    "Dimensions" => {
                        insert(world, id, entity, parse::<Dimensions>(id, component_type, value)?)?
                    }
                    "Mesh" => {
                        let mesh_ref = parse::<MeshRef>(id, component_type, value)?;
                        if !graph.meshes.contains(&mesh_ref.0) {
                            return Err(SceneError::MeshNotFound(mesh_ref.0));
                        }
                        insert(world, id, entity, mesh_ref)?
                    }
                    "Parent" => {
                        let parent_data = parse::<ParentData>(id, component_type, value)?;
                        let parent = parent_data
                            .try_to_parent(|old_id| mapper.remap(old_id))
                            .ok_or(SceneError::EntityNotFound(parent_data.entity_id))?;
                        insert(world, id, entity, parent)?
                    }
                    "RigidBody" => {
                        insert(world, id, entity, parse::<RigidBody>(id, component_type, value)?)?
                    }
                    "RigidBodyConstraint" => {
                        let data = parse::<ConstraintData>(id, component_type, value)?;
                        let constraint = data
                            .try_to_constraint(|old_id| mapper.remap(old_id))
                            .map_err(SceneError::EntityNotFound)?;
                        insert(world, id, entity, constraint)?
                    }
                    unknown => {
                        warn!(
                            entity_id = id,
                            component_type = unknown,
                            "Unknown component type in scene, skipping"
                        );
                    }
                }
            }

            if !graph.world.has::<Name>(entity) {
                insert(&mut graph.world, id, entity, Name(format!("Object.{id:03}")))?;
            }
        }

        graph.update_transforms()?;

        info!("Scene instantiation complete");
        Ok(graph)
    }

    fn load_meshes(
        &self,
        assets: &AssetConfig,
        library: &mut MeshLibrary,
    ) -> Result<(), SceneError> {
        for serialized in &self.meshes {
            let name = serialized.name();
            if library.contains(name) {
                return Err(SceneError::DuplicateMesh(name.to_string()));
            }

            let mesh = match serialized {
                SerializedMesh::Inline(mesh) => mesh.clone(),
                SerializedMesh::File { name, path } => {
                    let mesh_load = |source: MeshLoadError| SceneError::MeshLoad {
                        name: name.clone(),
                        source,
                    };
                    let full_path = assets
                        .mesh_path(path)
                        .ok_or_else(|| mesh_load(MeshLoadError::InvalidPath(path.clone())))?;
                    load_mesh_from_file(&full_path, name).map_err(mesh_load)?
                }
            };

            mesh.validate()?;
            debug!(mesh_name = name, "Loaded scene mesh");
            library.insert(mesh);
        }
        Ok(())
    }

    /// Save this scene to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let path = path.as_ref();
        info!(path = ?path, "Saving scene to file");

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        info!(path = ?path, "Scene saved successfully");
        Ok(())
    }

    /// Load a scene from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        info!(path = ?path, "Loading scene from file");

        let json = fs::read_to_string(path)?;
        let scene = serde_json::from_str(&json)?;

        info!(path = ?path, "Scene loaded successfully");
        Ok(scene)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn parse<T: DeserializeOwned>(
    id: u64,
    component_type: &str,
    value: &serde_json::Value,
) -> Result<T, SceneError> {
    T::deserialize(value).map_err(|e| {
        SceneError::ComponentError(format!(
            "entity {id}: failed to deserialize {component_type}: {e}"
        ))
    })
}

fn insert(
    world: &mut World,
    id: u64,
    entity: Entity,
    component: impl hecs::Component,
) -> Result<(), SceneError> {
    world
        .insert_one(entity, component)
        .map_err(|_| SceneError::EntityNotFound(id))
}
