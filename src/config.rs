//! Dataset manifest for the CLI
//!
//! The manifest lists the datasets to load at startup:
//!
//! ```yaml
//! datasets:
//!   - id: courses
//!     kind: courses
//!     path: data/courses.json
//!   - id: rooms
//!     kind: rooms
//!     path: data/rooms.json
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::dataset::DatasetKind;
use crate::storage::source::JsonRecordFile;
use crate::InsightFacade;

/// One dataset to preload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub id: String,
    pub kind: DatasetKind,
    /// JSON record file
    pub path: PathBuf,
}

/// Manifest file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub datasets: Vec<DatasetEntry>,
}

impl Manifest {
    /// Load a manifest; a missing file is an empty manifest
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No manifest at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut manifest: Manifest = serde_yaml::from_str(&content)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for entry in &mut manifest.datasets {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }

        Ok(manifest)
    }

    /// Add every listed dataset to the facade
    pub async fn apply(&self, facade: &InsightFacade) -> anyhow::Result<()> {
        for entry in &self.datasets {
            let source = JsonRecordFile::new(&entry.path);
            facade.add_dataset_from(&entry.id, entry.kind, &source).await?;
        }
        Ok(())
    }
}
