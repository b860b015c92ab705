//! rcp-an (Analytics) - descriptive statistics over the exported tables
//!
//! Reads recipe, ingredients and interactions from the data directory,
//! echoes the analytics summary to the log and writes
//! `analytics_summary.txt` back into the same directory.

use anyhow::{Context, Result};
use clap::Parser;
use rcp_common::config::{CommonArgs, PipelineConfig};
use rcp_common::logging::init_tracing;
use tracing::{error, info};

/// Command-line arguments for rcp-an
#[derive(Parser, Debug)]
#[command(name = "rcp-an")]
#[command(about = "Compute analytics over exported recipe pipeline tables")]
#[command(version)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = PipelineConfig::load(&args.common).context("Failed to load configuration")?;

    init_tracing(&config.logging.level)?;

    info!(
        "Starting rcp-an v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = &config.config_file {
        info!("Config file: {}", path.display());
    }
    info!(
        "Data directory: {} ({:?}), format: {}",
        config.data_dir.display(),
        config.data_dir_source,
        config.format
    );

    if let Err(e) = rcp_an::run(&config).await {
        error!("Analytics aborted: {}", e);
        return Err(e).context("Error in rcp-an");
    }

    Ok(())
}
