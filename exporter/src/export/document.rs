//! The assembled Bullet document

use super::records::{ConstraintRecord, HullRecord, MeshRecord, RigidBodyRecord};
use super::ExportError;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Everything written to a `.bullet` file
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BulletDocument {
    pub gravity: [f32; 3],
    pub rigid_bodys: Vec<RigidBodyRecord>,
    pub constraints: Vec<ConstraintRecord>,
    pub convex_hulls: Vec<HullRecord>,
    pub meshes: Vec<MeshRecord>,
}

/// Record counts of a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub rigid_bodies: usize,
    pub constraints: usize,
    pub convex_hulls: usize,
    pub meshes: usize,
}

impl std::fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rigid bodies, {} constraints, {} convex hulls, {} meshes",
            self.rigid_bodies, self.constraints, self.convex_hulls, self.meshes
        )
    }
}

impl BulletDocument {
    pub fn summary(&self) -> ExportSummary {
        ExportSummary {
            rigid_bodies: self.rigid_bodys.len(),
            constraints: self.constraints.len(),
            convex_hulls: self.convex_hulls.len(),
            meshes: self.meshes.len(),
        }
    }

    /// Serialize to JSON text
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Write the document to a file
    ///
    /// The text is fully serialized before the file is opened, so a
    /// serialization failure never leaves a truncated file behind.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, pretty: bool) -> Result<(), ExportError> {
        let path = path.as_ref();
        let json = self.to_json(pretty)?;
        fs::write(path, json).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = ?path, summary = %self.summary(), "Bullet document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_keys() {
        let document = BulletDocument {
            gravity: [0.0, 0.0, -9.81],
            ..Default::default()
        };
        let json = document.to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"gravity":[0.0,0.0,-9.81],"rigid_bodys":[],"constraints":[],"convex_hulls":[],"meshes":[]}"#
        );
    }

    #[test]
    fn test_pretty_output_parses_the_same() {
        let document = BulletDocument::default();
        let compact: serde_json::Value =
            serde_json::from_str(&document.to_json(false).unwrap()).unwrap();
        let pretty: serde_json::Value =
            serde_json::from_str(&document.to_json(true).unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("scene.bullet");
        let result = BulletDocument::default().save_to_file(&path, false);
        assert!(matches!(result, Err(ExportError::Io { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_summary_display() {
        let summary = ExportSummary {
            rigid_bodies: 2,
            constraints: 1,
            convex_hulls: 0,
            meshes: 3,
        };
        assert_eq!(
            summary.to_string(),
            "2 rigid bodies, 1 constraints, 0 convex hulls, 3 meshes"
        );
    }
}
