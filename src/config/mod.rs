//! Configuration
//!
//! Layered configuration for ingestion, storage, logging and watch mode.
//! Precedence (lowest to highest): built-in defaults, global file, workspace
//! file, `FSACCESS__*` environment variables.

pub mod facade;
pub mod ingest;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage;

pub use facade::ConfigLoader;
pub use ingest::IngestConfig;
pub use storage::StorageConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Workspace config file name.
pub const WORKSPACE_CONFIG_FILE: &str = "fsaccess.toml";

/// Environment prefix for config overrides (`FSACCESS__INGEST__ROOT_NAME`).
pub const ENV_PREFIX: &str = "FSACCESS";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FsAccessConfig {
    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub watch: WatchSettings,
}

fn default_debounce_ms() -> u64 {
    200
}

/// Watch mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSettings {
    /// Quiet window before a refresh, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl FsAccessConfig {
    /// Render as TOML, used by `init`.
    pub fn to_toml(&self) -> Result<String, crate::error::ApiError> {
        toml::to_string_pretty(self).map_err(|e| {
            crate::error::ApiError::ConfigError(format!("Failed to serialize config: {}", e))
        })
    }
}
