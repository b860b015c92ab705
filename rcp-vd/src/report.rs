//! Validation report writers
//!
//! - CSV: `validation_report.csv`, columns `table,row_index,error`
//! - JSON: `validation_report.json`, pretty array of `{table, index, error}`

use crate::findings::Finding;
use rcp_common::{DataFormat, Result, Table};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File stem of the validation report
pub const REPORT_STEM: &str = "validation_report";

/// JSON row shape
#[derive(Serialize)]
struct JsonFinding<'a> {
    table: Table,
    index: usize,
    error: &'a str,
}

/// Report file name for `format`
pub fn report_file_name(format: DataFormat) -> String {
    format!("{}.{}", REPORT_STEM, format.extension())
}

/// Serialize findings to report text
pub fn render_report(findings: &[Finding], format: DataFormat) -> Result<String> {
    match format {
        DataFormat::Csv => render_csv(findings),
        DataFormat::Json => render_json(findings),
    }
}

fn render_csv(findings: &[Finding]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    // Header is written explicitly so an empty report still carries it
    writer.write_record(["table", "row_index", "error"])?;
    for finding in findings {
        let row_index = finding.row_index.to_string();
        writer.write_record([finding.table.name(), row_index.as_str(), finding.message.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_json(findings: &[Finding]) -> Result<String> {
    let rows: Vec<JsonFinding<'_>> = findings
        .iter()
        .map(|f| JsonFinding {
            table: f.table,
            index: f.row_index,
            error: &f.message,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Write the report into `dir`, returning the written path
pub async fn write_report(dir: &Path, findings: &[Finding], format: DataFormat) -> Result<PathBuf> {
    let path = dir.join(report_file_name(format));
    let content = render_report(findings, format)?;
    tokio::fs::write(&path, content).await?;
    Ok(path)
}
