//! rcp-an library - ANalytics step
//!
//! Aggregates the recipe, ingredient and interaction tables into the
//! ten-section analytics summary and persists it as
//! `analytics_summary.txt` in the data directory.

use rcp_common::config::PipelineConfig;
use rcp_common::source::load_tables;
use rcp_common::{Result, Table};
use std::path::PathBuf;
use tracing::{debug, info};

pub mod aggregate;
pub mod report;

pub use report::{generate_report, AnalyticsReport};

/// Summary artifact file name
pub const SUMMARY_FILE: &str = "analytics_summary.txt";

/// Tables the report reads; steps are not needed
pub const INPUT_TABLES: [Table; 3] = [Table::Recipe, Table::Ingredients, Table::Interactions];

/// Result of one analytics run
#[derive(Debug, Clone)]
pub struct AnalyticsOutcome {
    pub report: AnalyticsReport,
    pub summary_path: PathBuf,
}

/// Load inputs, generate the report, echo it and write the summary file
pub async fn run(config: &PipelineConfig) -> Result<AnalyticsOutcome> {
    let records = load_tables(&config.data_dir, config.format, &INPUT_TABLES).await?;
    debug!(
        "Loaded {} recipes, {} ingredients, {} interactions",
        records.recipes.len(),
        records.ingredients.len(),
        records.interactions.len()
    );

    let report = generate_report(&records, &config.analytics);
    for line in report.lines() {
        info!("{}", line);
    }

    let summary_path = config.data_dir.join(SUMMARY_FILE);
    tokio::fs::write(&summary_path, report.to_text()).await?;
    info!("✓ Analytics summary saved to {}", SUMMARY_FILE);

    Ok(AnalyticsOutcome {
        report,
        summary_path,
    })
}
