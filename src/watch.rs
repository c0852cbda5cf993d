//! Watch mode: re-ingest when files under the attached directory change.

mod events;
mod runtime;

pub use events::{is_ignored, is_relevant, WatchConfig};
pub use runtime::WatchDaemon;
