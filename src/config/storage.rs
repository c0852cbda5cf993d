//! StorageConfig and store path resolution.

use super::paths;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_snapshot_key() -> String {
    "records".to_string()
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the sled database. Relative paths are resolved against the
    /// workspace root; unset means the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Key holding the serialized records snapshot
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
}

impl StorageConfig {
    /// Resolve the store path to an actual filesystem location.
    pub fn resolve_store_path(&self, workspace_root: &Path) -> Result<PathBuf, ApiError> {
        match &self.store_path {
            Some(path) if path.is_absolute() => Ok(path.clone()),
            Some(path) => Ok(workspace_root.join(path)),
            None => Ok(paths::workspace_data_dir(workspace_root)?.join("store")),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            snapshot_key: default_snapshot_key(),
        }
    }
}
