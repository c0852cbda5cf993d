//! fsaccess: Directory Ingestion and Record Store
//!
//! Reads a `resources/src/<bucket>/<file>` tree into typed records and
//! merges them into a persisted, observable record store.

pub mod app;
pub mod config;
pub mod error;
pub mod host;
pub mod ingest;
pub mod logging;
pub mod parse;
pub mod store;
pub mod tooling;
pub mod types;
pub mod views;
pub mod watch;
