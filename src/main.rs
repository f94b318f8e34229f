#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Registry, fmt, reload};

use viking_memory::VikingConfig;

mod cli;

use cli::Cli;

/// Install the stderr subscriber; the returned handle raises the level once
/// config is known.
fn init_logging(verbose: bool) -> Result<reload::Handle<LevelFilter, Registry>> {
    let initial = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let (filter, handle) = reload::Layer::new(initial);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(handle)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logging first so config-load warnings are visible.
    let log_level = init_logging(cli.verbose)?;
    let config = VikingConfig::load();
    if config.debug && !cli.verbose {
        log_level.modify(|level| *level = LevelFilter::DEBUG)?;
    }

    cli::dispatch(cli, config).await
}
