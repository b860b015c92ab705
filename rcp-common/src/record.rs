//! Flat record model for the exported tables
//!
//! Records are field name → text mappings. Column order is kept as read so
//! that rows can be inspected in the same order as the source file.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One of the four exported tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Recipe,
    Ingredients,
    Steps,
    Interactions,
}

impl Table {
    /// All tables in pipeline order
    pub const ALL: [Table; 4] = [
        Table::Recipe,
        Table::Ingredients,
        Table::Steps,
        Table::Interactions,
    ];

    /// Table name as used in file stems and report rows
    pub fn name(&self) -> &'static str {
        match self {
            Table::Recipe => "recipe",
            Table::Ingredients => "ingredients",
            Table::Steps => "steps",
            Table::Interactions => "interactions",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A single flat row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Raw field value; `None` when the field is absent
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Field value with absent treated as empty
    pub fn text(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// True when the field is absent or an empty string
    pub fn is_blank(&self, field: &str) -> bool {
        self.text(field).is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build a record from a JSON object
    ///
    /// Strings are kept verbatim, numbers and booleans use their JSON text,
    /// arrays are joined with `,` and `null` leaves the field absent.
    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let mut record = Record::new();
        for (field, value) in object {
            if let Some(text) = json_scalar_text(value) {
                record.insert(field.clone(), text);
            }
        }
        record
    }
}

fn json_scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(json_scalar_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// The four record sequences of one pipeline run, fully materialized
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub recipes: Vec<Record>,
    pub ingredients: Vec<Record>,
    pub steps: Vec<Record>,
    pub interactions: Vec<Record>,
}

impl RecordSet {
    /// Records of one table
    pub fn table(&self, table: Table) -> &[Record] {
        match table {
            Table::Recipe => &self.recipes,
            Table::Ingredients => &self.ingredients,
            Table::Steps => &self.steps,
            Table::Interactions => &self.interactions,
        }
    }

    pub(crate) fn table_mut(&mut self, table: Table) -> &mut Vec<Record> {
        match table {
            Table::Recipe => &mut self.recipes,
            Table::Ingredients => &mut self.ingredients,
            Table::Steps => &mut self.steps,
            Table::Interactions => &mut self.interactions,
        }
    }

    pub fn total_records(&self) -> usize {
        Table::ALL.iter().map(|t| self.table(*t).len()).sum()
    }
}
