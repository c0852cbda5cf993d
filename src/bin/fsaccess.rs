//! fsaccess CLI Binary

use anyhow::Context;
use clap::Parser;
use fsaccess::logging::init_logging;
use fsaccess::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = CliContext::load_config(&cli.workspace, cli.config.as_deref())
        .context("Error loading configuration")?;

    let logging = cli.logging_config(&config.logging);
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = CliContext::from_config(cli.workspace.clone(), config, cli.store.clone())
        .context("Error initializing record store")?;

    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
