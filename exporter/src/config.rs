//! Configuration types for the exporter

use glam::Quat;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// File extension appended to export destinations that have none
pub const BULLET_EXTENSION: &str = "bullet";

/// Component ordering used when writing quaternions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuaternionOrder {
    /// `[w, x, y, z]`, the layout existing `.bullet` loaders read
    #[default]
    ScalarFirst,
    /// `[x, y, z, w]`
    ScalarLast,
}

impl QuaternionOrder {
    /// Lay out the quaternion components in this order
    pub fn components(self, q: Quat) -> [f32; 4] {
        match self {
            QuaternionOrder::ScalarLast => [q.x, q.y, q.z, q.w],
            QuaternionOrder::ScalarFirst => [q.w, q.x, q.y, q.z],
        }
    }
}

/// Options controlling a single export call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportConfig {
    /// Write `convex_hulls` entries for bodies with a convex hull shape
    pub export_hulls: bool,
    /// Write triangulated `meshes` entries for bodies with a mesh shape
    pub export_meshes: bool,
    /// Pretty-print the JSON output
    pub pretty: bool,
    /// Quaternion component ordering in every record
    pub quaternion_order: QuaternionOrder,
}

impl ExportConfig {
    /// Create a config with the two geometry flags set
    pub fn new(export_hulls: bool, export_meshes: bool) -> Self {
        debug!(export_hulls, export_meshes, "Creating new ExportConfig");
        Self {
            export_hulls,
            export_meshes,
            ..Default::default()
        }
    }

    pub fn with_hulls(mut self, export_hulls: bool) -> Self {
        self.export_hulls = export_hulls;
        self
    }

    pub fn with_meshes(mut self, export_meshes: bool) -> Self {
        self.export_meshes = export_meshes;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_quaternion_order(mut self, order: QuaternionOrder) -> Self {
        self.quaternion_order = order;
        self
    }
}

/// Configuration for resolving mesh files referenced by a scene
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Directory that relative mesh paths are resolved against
    pub asset_root: PathBuf,
}

impl AssetConfig {
    /// Create a new AssetConfig rooted at the given directory
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        let asset_root = asset_root.into();
        debug!(asset_root = ?asset_root, "Creating new AssetConfig");
        Self { asset_root }
    }

    /// Get the full path to a mesh file
    ///
    /// Returns `None` for absolute paths and paths that climb out of the
    /// asset root.
    pub fn mesh_path(&self, relative: &Path) -> Option<PathBuf> {
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes || relative.is_absolute() {
            return None;
        }
        let path = self.asset_root.join(relative);
        debug!(relative = ?relative, path = ?path, "Generated mesh path");
        Some(path)
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("."),
        }
    }
}

/// Append the `.bullet` extension when the destination has no extension
pub fn with_bullet_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(BULLET_EXTENSION)
    }
}
