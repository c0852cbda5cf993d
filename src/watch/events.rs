//! Watch configuration and event filtering.

use notify::{Event, EventKind};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shortest quiet window; a zero timeout would spin the receive loop.
const MIN_DEBOUNCE_MS: u64 = 10;

/// Watch mode configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Directory to watch (the attached root)
    pub root: PathBuf,
    /// Quiet window before a refresh, in milliseconds
    pub debounce_ms: u64,
    /// File name patterns to ignore: exact names or `*suffix`
    pub ignore_patterns: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            debounce_ms: 200,
            ignore_patterns: vec![
                ".DS_Store".to_string(),
                "*.swp".to_string(),
                "*.tmp".to_string(),
                "*~".to_string(),
            ],
        }
    }
}

impl WatchConfig {
    /// Quiet window before a refresh, never shorter than `MIN_DEBOUNCE_MS`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.max(MIN_DEBOUNCE_MS))
    }
}

pub fn is_ignored(path: &Path, patterns: &[String]) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    patterns.iter().any(|pattern| match pattern.strip_prefix('*') {
        Some(suffix) => name.ends_with(suffix),
        None => name == pattern.as_str(),
    })
}

/// True for create/modify/remove events touching at least one non-ignored path.
pub fn is_relevant(event: &Event, config: &WatchConfig) -> bool {
    let kind_matters = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    kind_matters
        && event
            .paths
            .iter()
            .any(|p| !is_ignored(p, &config.ignore_patterns))
}
