//! Scene snapshot loading
//!
//! A scene file lists objects as component maps, the way the host exposes
//! them. Loading turns it into a [`SceneGraph`](crate::core::SceneGraph).

mod entity_mapper;
mod scene;

pub use entity_mapper::EntityMapper;
pub use scene::{Scene, SceneError, SerializedEntity, SerializedMesh};
