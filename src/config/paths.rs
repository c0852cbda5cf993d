//! Platform directories for config, data and logs.

use crate::error::ApiError;
use directories::ProjectDirs;
use std::path::{Component, Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs, ApiError> {
    ProjectDirs::from("", "fsaccess", "fsaccess").ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform directories (HOME not set)".to_string())
    })
}

/// Global config file: `<config dir>/config.toml`
pub fn global_config_file() -> Result<PathBuf, ApiError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Directory for log files. Falls back to the data directory on platforms
/// without a state directory.
pub fn state_dir() -> Result<PathBuf, ApiError> {
    let dirs = project_dirs()?;
    Ok(dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .to_path_buf())
}

/// Data directory for one workspace.
///
/// The canonical workspace path is mirrored below the data directory, so
/// `/home/user/site` maps to `<data dir>/home/user/site/`.
pub fn workspace_data_dir(workspace_root: &Path) -> Result<PathBuf, ApiError> {
    let canonical = workspace_root.canonicalize().map_err(|e| {
        ApiError::ConfigError(format!("Failed to canonicalize workspace path: {}", e))
    })?;

    let mut dir = project_dirs()?.data_dir().to_path_buf();
    for component in canonical.components() {
        if let Component::Normal(name) = component {
            dir = dir.join(name);
        }
    }
    Ok(dir)
}
