//! Per-table validation rules
//!
//! Every check on a row is independent, so a row can yield several findings.
//! Enum fields compare lower-cased; messages echo the original value.
//! An unparsable number is reported with the same message as an
//! out-of-range one (downstream consumers match on these strings).

use crate::findings::{Finding, FindingsCollector};
use rcp_common::numeric::{coerce_number, coerce_number_or};
use rcp_common::{Record, RecordSet, Table};

/// Accepted `difficulty` values (lower-case)
pub const DIFFICULTIES: [&str; 3] = ["easy", "medium", "hard"];

/// Accepted interaction `type` values (lower-case)
pub const INTERACTION_TYPES: [&str; 4] = ["view", "like", "cook_attempt", "rating"];

/// Inclusive rating bounds
pub const RATING_RANGE: (f64, f64) = (0.0, 5.0);

/// Validate one table's rows, appending to `collector`
pub fn validate(table: Table, records: &[Record], collector: &mut FindingsCollector) {
    for (idx, row) in records.iter().enumerate() {
        match table {
            Table::Recipe => check_recipe(row, idx, collector),
            Table::Ingredients => check_ingredient(row, idx, collector),
            Table::Steps => check_step(row, idx, collector),
            Table::Interactions => check_interaction(row, idx, collector),
        }
    }
}

/// Validate one table and return only its findings
pub fn validate_table(table: Table, records: &[Record]) -> Vec<Finding> {
    let mut collector = FindingsCollector::new();
    validate(table, records, &mut collector);
    collector.into_findings()
}

/// Validate all four tables in pipeline order
pub fn validate_all(records: &RecordSet) -> FindingsCollector {
    let mut collector = FindingsCollector::new();
    for table in Table::ALL {
        validate(table, records.table(table), &mut collector);
    }
    collector
}

fn require_non_empty(
    row: &Record,
    field: &str,
    table: Table,
    idx: usize,
    collector: &mut FindingsCollector,
) {
    if row.is_blank(field) {
        collector.push(table, idx, format!("{} is null/empty", field));
    }
}

fn check_recipe(row: &Record, idx: usize, collector: &mut FindingsCollector) {
    let table = Table::Recipe;
    require_non_empty(row, "recipe_id", table, idx, collector);
    require_non_empty(row, "name", table, idx, collector);

    match coerce_number(row.get("servings")) {
        Some(servings) if servings > 0.0 => {}
        _ => collector.push(table, idx, "servings must be > 0"),
    }

    // Blank times default to zero
    for field in ["prep_time_min", "cook_time_min"] {
        match coerce_number_or(row.get(field), 0.0) {
            Some(minutes) if minutes >= 0.0 => {}
            _ => collector.push(table, idx, format!("{} must be >= 0", field)),
        }
    }

    let difficulty = row.text("difficulty");
    if !DIFFICULTIES.contains(&difficulty.to_lowercase().as_str()) {
        collector.push(table, idx, format!("invalid difficulty: {}", difficulty));
    }
}

fn check_ingredient(row: &Record, idx: usize, collector: &mut FindingsCollector) {
    let table = Table::Ingredients;
    require_non_empty(row, "recipe_id", table, idx, collector);
    require_non_empty(row, "name", table, idx, collector);

    if !row.is_blank("quantity") {
        let quantity = row.text("quantity");
        match coerce_number(Some(quantity)) {
            Some(q) if q >= 0.0 => {}
            _ => collector.push(
                table,
                idx,
                format!("quantity must be >= 0 or empty, got: {}", quantity),
            ),
        }
    }
}

fn check_step(row: &Record, idx: usize, collector: &mut FindingsCollector) {
    let table = Table::Steps;
    require_non_empty(row, "recipe_id", table, idx, collector);
    require_non_empty(row, "text", table, idx, collector);

    match coerce_number(row.get("order")) {
        Some(order) if order > 0.0 => {}
        _ => collector.push(table, idx, "order must be > 0"),
    }
}

fn check_interaction(row: &Record, idx: usize, collector: &mut FindingsCollector) {
    let table = Table::Interactions;
    for field in ["interaction_id", "user_id", "recipe_id"] {
        require_non_empty(row, field, table, idx, collector);
    }

    let kind = row.text("type");
    if !INTERACTION_TYPES.contains(&kind.to_lowercase().as_str()) {
        collector.push(table, idx, format!("invalid type: {}", kind));
    }

    if !row.is_blank("rating") {
        let rating = row.text("rating");
        if !is_valid_rating(rating) {
            collector.push(table, idx, format!("invalid rating: {}", rating));
        }
    }
}

/// Whole number within [`RATING_RANGE`]
fn is_valid_rating(rating: &str) -> bool {
    let (min, max) = RATING_RANGE;
    match coerce_number(Some(rating)) {
        Some(r) => r.fract() == 0.0 && (min..=max).contains(&r),
        None => false,
    }
}
