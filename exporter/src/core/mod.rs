//! Core scene representation consumed by the exporter

pub mod entity;
mod scene_graph;

pub use scene_graph::{SceneGraph, DEFAULT_GRAVITY};
