//! Base builder carrying the built-in defaults.

use crate::types::{FUNCTION_BUCKET, JSON_BUCKET, ROOT_NAME, SOURCE_DIR};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with defaults for the keys most often overridden.
/// Everything else falls back to the serde defaults on `FsAccessConfig`.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("ingest.root_name", ROOT_NAME)?
        .set_default("ingest.source_dir", SOURCE_DIR)?
        .set_default("ingest.json_bucket", JSON_BUCKET)?
        .set_default("ingest.function_bucket", FUNCTION_BUCKET)?
        .set_default("storage.snapshot_key", "records")
}
