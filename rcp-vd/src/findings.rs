//! Validation findings and the collector that accumulates them

use rcp_common::Table;
use std::fmt;

/// One validation failure, tied to a table and a zero-based row index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub table: Table,
    pub row_index: usize,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.table, self.row_index, self.message)
    }
}

/// Ordered accumulator of findings for one validation run
///
/// Passed into each per-table check; order is call order, then row order.
#[derive(Debug, Clone, Default)]
pub struct FindingsCollector {
    findings: Vec<Finding>,
}

impl FindingsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, table: Table, row_index: usize, message: impl Into<String>) {
        self.findings.push(Finding {
            table,
            row_index,
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Number of findings per table, in pipeline order
    pub fn counts_by_table(&self) -> Vec<(Table, usize)> {
        Table::ALL
            .iter()
            .map(|table| {
                let count = self.findings.iter().filter(|f| f.table == *table).count();
                (*table, count)
            })
            .collect()
    }
}
