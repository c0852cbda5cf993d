//! Tooling & Integration Layer
//!
//! Command-line entry points over the application root.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
