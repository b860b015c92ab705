//! Record Source: reads the exported tables from the data directory
//!
//! **Files:** `<data_dir>/{recipe,ingredients,steps,interactions}.{csv,json}`
//!
//! Both formats carry identical field names. Reads are sequential; a missing
//! or malformed file aborts the run with [`Error::InputUnavailable`].

use crate::record::{Record, RecordSet, Table};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// On-disk format of the exported tables and written artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Delimited text with a header row
    #[default]
    Csv,
    /// Pretty-printed array of flat objects
    Json,
}

impl DataFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Json => "json",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DataFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(DataFormat::Csv),
            "json" => Ok(DataFormat::Json),
            other => Err(Error::InvalidInput(format!(
                "unknown data format '{}' (expected csv or json)",
                other
            ))),
        }
    }
}

/// Path of a table's export file inside `dir`
pub fn table_path(dir: &Path, table: Table, format: DataFormat) -> PathBuf {
    dir.join(format!("{}.{}", table.name(), format.extension()))
}

/// Load one table from `dir`
pub async fn load_table(dir: &Path, table: Table, format: DataFormat) -> Result<Vec<Record>> {
    let path = table_path(dir, table, format);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| Error::input_unavailable(&path, e))?;

    let records = match format {
        DataFormat::Csv => parse_csv(&bytes),
        DataFormat::Json => parse_json(&bytes),
    }
    .map_err(|reason| Error::input_unavailable(&path, reason))?;

    debug!("Loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Load the requested tables; tables not listed stay empty
pub async fn load_tables(dir: &Path, format: DataFormat, tables: &[Table]) -> Result<RecordSet> {
    let mut set = RecordSet::default();
    for table in tables {
        *set.table_mut(*table) = load_table(dir, *table, format).await?;
    }
    Ok(set)
}

/// Load all four tables in pipeline order
pub async fn load_record_set(dir: &Path, format: DataFormat) -> Result<RecordSet> {
    load_tables(dir, format, &Table::ALL).await
}

/// Parse delimited text with a header row
///
/// Rows shorter than the header leave the trailing fields absent; extra
/// cells beyond the header are ignored.
pub fn parse_csv(bytes: &[u8]) -> std::result::Result<Vec<Record>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| format!("invalid header row: {}", e))?
        .clone();

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| format!("row {}: {}", idx, e))?;
        let record: Record = headers.iter().zip(row.iter()).collect();
        records.push(record);
    }
    Ok(records)
}

/// Parse a top-level JSON array of flat objects
pub fn parse_json(bytes: &[u8]) -> std::result::Result<Vec<Record>, String> {
    let document: Value = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    let rows = document
        .as_array()
        .ok_or_else(|| "expected a top-level array of objects".to_string())?;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            row.as_object()
                .map(Record::from_json_object)
                .ok_or_else(|| format!("row {} is not an object", idx))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_header_and_rows() {
        let text = "recipe_id,name,servings\nr1,Soup,2\nr2,\"Pav, Bhaji\",4\n";
        let records = parse_csv(text.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("recipe_id"), Some("r1"));
        assert_eq!(records[1].get("name"), Some("Pav, Bhaji"));
        assert_eq!(records[1].get("servings"), Some("4"));
    }

    #[test]
    fn test_parse_csv_short_row_leaves_fields_absent() {
        let text = "recipe_id,name,servings\nr1,Soup\n";
        let records = parse_csv(text.as_bytes()).unwrap();

        assert_eq!(records[0].get("name"), Some("Soup"));
        assert_eq!(records[0].get("servings"), None);
    }

    #[test]
    fn test_parse_csv_empty_cells_are_empty_strings() {
        let text = "interaction_id,rating\nint_0,\n";
        let records = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(records[0].get("rating"), Some(""));
    }

    #[test]
    fn test_parse_json_array() {
        let text = r#"[{"recipe_id": "r1", "servings": 2}, {"recipe_id": "r2", "servings": null}]"#;
        let records = parse_json(text.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("servings"), Some("2"));
        assert_eq!(records[1].get("servings"), None);
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        assert!(parse_json(br#"{"recipe_id": "r1"}"#).is_err());
        assert!(parse_json(br#"[1, 2]"#).is_err());
        assert!(parse_json(b"not json").is_err());
    }

    #[test]
    fn test_data_format_from_str() {
        assert_eq!("CSV".parse::<DataFormat>().unwrap(), DataFormat::Csv);
        assert_eq!("json".parse::<DataFormat>().unwrap(), DataFormat::Json);
        assert!("parquet".parse::<DataFormat>().is_err());
    }

    #[test]
    fn test_table_path() {
        let path = table_path(Path::new("/data"), Table::Interactions, DataFormat::Json);
        assert_eq!(path, PathBuf::from("/data/interactions.json"));
    }
}
