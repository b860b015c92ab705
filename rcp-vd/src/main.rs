//! rcp-vd (Validate Data) - schema checks over the exported tables
//!
//! Reads recipe, ingredients, steps and interactions from the data
//! directory and writes `validation_report.{csv,json}` back into it.
//! Exits 0 whether or not findings exist; exits non-zero only when an
//! input file is missing or unreadable.

use anyhow::{Context, Result};
use clap::Parser;
use rcp_common::config::{CommonArgs, PipelineConfig};
use rcp_common::logging::init_tracing;
use tracing::{error, info};

/// Command-line arguments for rcp-vd
#[derive(Parser, Debug)]
#[command(name = "rcp-vd")]
#[command(about = "Validate exported recipe pipeline tables")]
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
        "Starting rcp-vd v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config.config_file {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    info!(
        "Data directory: {} ({:?}), format: {}",
        config.data_dir.display(),
        config.data_dir_source,
        config.format
    );

    let outcome = match rcp_vd::run(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Validation aborted: {}", e);
            return Err(e).context("Error in rcp-vd");
        }
    };

    info!("Report written to {}", outcome.report_path.display());
    Ok(())
}
