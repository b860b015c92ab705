//! Numeric coercion for exported field values
//!
//! Every numeric read in the pipeline goes through [`coerce_number`] so the
//! validator and the analytics step agree on what a number is.
//!
//! - absent field → `None`
//! - blank field → `Some(0.0)` (the export writes missing numbers as empty cells)
//! - decimal text → `Some(value)`
//! - anything else, including `NaN` and infinities → `None`

/// Convert an optional field value to a finite number
pub fn coerce_number(value: Option<&str>) -> Option<f64> {
    let text = value?.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

/// Like [`coerce_number`], but an absent or blank field defaults to `default`
pub fn coerce_number_or(value: Option<&str>, default: f64) -> Option<f64> {
    match value {
        Some(v) if !v.trim().is_empty() => coerce_number(Some(v)),
        _ => Some(default),
    }
}
