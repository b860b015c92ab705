//! rcp-vd library - Validate Data step
//!
//! Scans the four exported tables and writes a validation report next to
//! them. Findings are data, not failures: a run with findings still
//! succeeds. Only an unavailable input aborts the run.

use rcp_common::config::PipelineConfig;
use rcp_common::source::load_record_set;
use rcp_common::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub mod findings;
pub mod report;
pub mod rules;

pub use findings::{Finding, FindingsCollector};
pub use rules::{validate, validate_all, validate_table};

/// Result of one validation run
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub findings: Vec<Finding>,
    pub report_path: PathBuf,
}

/// One-line operator summary for a run
pub fn summary_line(finding_count: usize, report_file: &str) -> String {
    if finding_count == 0 {
        "All records passed validation. No errors.".to_string()
    } else {
        format!(
            "Found {} validation errors. See {}",
            finding_count, report_file
        )
    }
}

/// Load, validate and persist the report for the configured data directory
pub async fn run(config: &PipelineConfig) -> Result<ValidationOutcome> {
    let records = load_record_set(&config.data_dir, config.format).await?;
    debug!(
        "Loaded {} recipes, {} ingredients, {} steps, {} interactions",
        records.recipes.len(),
        records.ingredients.len(),
        records.steps.len(),
        records.interactions.len()
    );

    let collector = validate_all(&records);
    for (table, count) in collector.counts_by_table() {
        debug!("{}: {} findings", table, count);
    }

    let findings = collector.into_findings();
    let report_path = report::write_report(&config.data_dir, &findings, config.format).await?;

    let summary = summary_line(findings.len(), &report::report_file_name(config.format));
    if findings.is_empty() {
        info!("✓ {}", summary);
    } else {
        warn!("{}", summary);
    }

    Ok(ValidationOutcome {
        findings,
        report_path,
    })
}
