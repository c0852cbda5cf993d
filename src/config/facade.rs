//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::{FsAccessConfig, WORKSPACE_CONFIG_FILE};
use crate::error::ApiError;
use std::path::{Path, PathBuf};

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment.
    pub fn load(workspace_root: &Path) -> Result<FsAccessConfig, ApiError> {
        Ok(MergeService::load(workspace_root)?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<FsAccessConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Ok(MergeService::load_from_file(path)?)
    }

    /// Workspace config file location.
    pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(WORKSPACE_CONFIG_FILE)
    }

    /// Write the default configuration into the workspace.
    ///
    /// Returns the written path. An existing file is kept unless `force`.
    pub fn write_default(workspace_root: &Path, force: bool) -> Result<PathBuf, ApiError> {
        let path = Self::workspace_config_path(workspace_root);
        if path.exists() && !force {
            return Err(ApiError::ConfigError(format!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }
        let content = FsAccessConfig::default().to_toml()?;
        std::fs::write(&path, content).map_err(|e| {
            ApiError::ConfigError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(path)
    }
}
