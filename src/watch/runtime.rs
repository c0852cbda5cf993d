//! Watch daemon loop.

use super::events::{is_relevant, WatchConfig};
use crate::app::{Application, RefreshOutcome};
use crate::error::{ApiError, StorageError};
use notify::{RecursiveMode, Watcher};
use std::sync::mpsc;
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

/// Watch mode daemon
pub struct WatchDaemon {
    app: Application,
    config: WatchConfig,
}

impl WatchDaemon {
    pub fn new(app: Application, config: WatchConfig) -> Self {
        Self { app, config }
    }

    pub fn app(&self) -> &Application {
        &self.app
    }

    /// Refresh once, then again after every quiet window that follows a
    /// relevant change. Returns when the watcher channel closes.
    pub fn run(&mut self, runtime: &Runtime) -> Result<(), ApiError> {
        match runtime.block_on(self.app.refresh())? {
            RefreshOutcome::NoSelection => {
                return Err(ApiError::ConfigError(
                    "No directory selected, nothing to watch".to_string(),
                ))
            }
            outcome => info!(?outcome, "Initial read complete"),
        }

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            if let Err(e) = tx.send(res) {
                error!("Error sending watch event: {}", e);
            }
        })
        .map_err(|e| watch_error("Failed to create watcher", e))?;

        watcher
            .watch(&self.config.root, RecursiveMode::Recursive)
            .map_err(|e| watch_error("Failed to watch directory", e))?;

        info!(root = %self.config.root.display(), "Watching directory");

        let debounce = self.config.debounce();
        let mut pending_since: Option<Instant> = None;

        loop {
            match rx.recv_timeout(debounce) {
                Ok(Ok(event)) => {
                    if is_relevant(&event, &self.config) {
                        debug!(paths = ?event.paths, "Change detected");
                        pending_since = Some(Instant::now());
                    }
                }
                Ok(Err(e)) => warn!("Watch error: {}", e),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    error!("Watcher channel disconnected");
                    break;
                }
            }

            if pending_since.is_some_and(|t| t.elapsed() >= debounce) {
                pending_since = None;
                match runtime.block_on(self.app.refresh()) {
                    Ok(outcome) => info!(?outcome, "Refreshed after change"),
                    Err(e) => error!("Refresh failed: {}", e),
                }
            }
        }

        Ok(())
    }
}

fn watch_error(context: &str, err: notify::Error) -> ApiError {
    ApiError::StorageError(StorageError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("{}: {}", context, err),
    )))
}
