//! Integration tests for directory ingestion and the record store

mod cli_commands;
mod cli_parse;
mod ingest_pipeline;
mod store_persistence;
mod support;
