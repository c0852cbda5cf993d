//! CLI Tooling
//!
//! Command-line interface: ingest a resources directory into the persisted
//! record store, query it, and watch for changes.

use crate::app::{Application, RefreshOutcome};
use crate::config::{ConfigLoader, FsAccessConfig};
use crate::error::ApiError;
use crate::host::{DirectoryPicker, FixedPicker, PromptPicker};
use crate::ingest::IngestionEngine;
use crate::logging::LoggingConfig;
use crate::store::{RecordStore, SledSnapshotStorage, SnapshotStorage};
use crate::views::{self, LiveView, OutputFormat, StoreStatus};
use crate::watch::{WatchConfig, WatchDaemon};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

/// fsaccess - ingest a resources directory into a persisted record store
#[derive(Parser)]
#[command(name = "fsaccess")]
#[command(about = "Ingest a resources directory into a persisted, observable record store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config lookup and store scoping)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Record store directory (overrides storage.store_path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply the logging flags on top of the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read the resources directory and merge its records into the store
    Read {
        /// Resources directory (prompted for when omitted)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show stored records
    Show {
        /// Bucket to show (all buckets when omitted)
        #[arg(long)]
        bucket: Option<String>,
        /// Record id within the bucket
        #[arg(long, requires = "bucket")]
        id: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Summarize the record store
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Re-read the resources directory whenever it changes
    Watch {
        /// Resources directory
        #[arg(long)]
        dir: PathBuf,
        /// Quiet window before a refresh (defaults to watch.debounce_ms)
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
    /// Write a default fsaccess.toml into the workspace
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// CLI context: loaded config, opened store, and the async runtime.
pub struct CliContext {
    workspace_root: PathBuf,
    config: FsAccessConfig,
    store: Arc<RecordStore>,
    runtime: Runtime,
}

impl CliContext {
    /// Load config from `config_path`, or from the standard sources.
    pub fn load_config(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<FsAccessConfig, ApiError> {
        match config_path {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(workspace_root),
        }
    }

    /// Create a CLI context with config loaded from disk and a sled store.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        store_path: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = Self::load_config(&workspace_root, config_path.as_deref())?;
        Self::from_config(workspace_root, config, store_path)
    }

    /// Create a CLI context from an already loaded config.
    pub fn from_config(
        workspace_root: PathBuf,
        config: FsAccessConfig,
        store_path: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let store_path = match store_path {
            Some(path) => path,
            None => config.storage.resolve_store_path(&workspace_root)?,
        };
        let storage = Arc::new(SledSnapshotStorage::open(&store_path)?);
        info!(store = %store_path.display(), "Opened record store");
        Self::with_storage(workspace_root, config, storage)
    }

    /// Create a CLI context over any snapshot storage.
    pub fn with_storage(
        workspace_root: PathBuf,
        config: FsAccessConfig,
        storage: Arc<dyn SnapshotStorage>,
    ) -> Result<Self, ApiError> {
        let store = Arc::new(RecordStore::new(storage, config.storage.snapshot_key.clone()));
        store.init()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start async runtime: {}", e)))?;

        Ok(Self {
            workspace_root,
            config,
            store,
            runtime,
        })
    }

    pub fn config(&self) -> &FsAccessConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    fn application(&self, dir: Option<&Path>) -> Application {
        let picker: Arc<dyn DirectoryPicker> = match dir {
            Some(dir) => Arc::new(FixedPicker::new(dir)),
            None => Arc::new(PromptPicker::default()),
        };
        let engine = IngestionEngine::new(self.config.ingest.clone(), picker);
        Application::new(engine, Arc::clone(&self.store))
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Read { dir, format } => {
                let format = OutputFormat::parse(format)?;
                self.handle_read(dir.as_deref(), format)
            }
            Commands::Show { bucket, id, format } => {
                let format = OutputFormat::parse(format)?;
                Ok(match bucket {
                    Some(bucket) => views::render_query(&self.store, bucket, id.as_deref(), format),
                    None => views::render_records(&self.store, format),
                })
            }
            Commands::Status { format } => {
                let format = OutputFormat::parse(format)?;
                views::render_status(&StoreStatus::collect(&self.store, None), format)
            }
            Commands::Watch { dir, debounce_ms } => self.handle_watch(dir, *debounce_ms),
            Commands::Init { force } => {
                let path = ConfigLoader::write_default(&self.workspace_root, *force)?;
                Ok(format!("Wrote {}", path.display()))
            }
        }
    }

    fn handle_read(&self, dir: Option<&Path>, format: OutputFormat) -> Result<String, ApiError> {
        let mut app = self.application(dir);
        let outcome = self.runtime.block_on(app.refresh())?;

        match (format, outcome) {
            (OutputFormat::Json, _) => Ok(views::render_records(&self.store, format)),
            (OutputFormat::Text, RefreshOutcome::NoSelection) => {
                Ok("No directory selected; store unchanged.".to_string())
            }
            (
                OutputFormat::Text,
                RefreshOutcome::Ingested {
                    buckets,
                    records,
                    modified,
                },
            ) => Ok(format!(
                "Read {} records in {} buckets ({})\n\n{}",
                records,
                buckets,
                if modified { "modified" } else { "unchanged" },
                views::render_records(&self.store, format)
            )),
        }
    }

    fn handle_watch(&self, dir: &Path, debounce_ms: Option<u64>) -> Result<String, ApiError> {
        let app = self.application(Some(dir));
        let config = WatchConfig {
            root: dir.to_path_buf(),
            debounce_ms: debounce_ms.unwrap_or(self.config.watch.debounce_ms),
            ..WatchConfig::default()
        };

        let view = LiveView::bind(&self.store, |store| {
            println!("{}", views::render_records(store, OutputFormat::Text));
        });

        info!("Starting watch mode");
        let mut daemon = WatchDaemon::new(app, config);
        let result = daemon.run(&self.runtime);
        view.unbind();
        result.map(|()| "Watch stopped".to_string())
    }
}
