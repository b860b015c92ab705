//! Counting and averaging primitives used by the analytics report
//!
//! All functions are pure. Maps are insertion ordered, so iteration order is
//! first-seen order and `top_n` ties are reproducible.

use indexmap::IndexMap;
use std::cmp::Ordering;

/// Key → occurrence count, in first-seen key order
pub type Counts = IndexMap<String, usize>;

/// Count records per key
///
/// Records whose key is absent or empty are skipped entirely; there is no
/// "unknown" bucket.
pub fn count_by<I, F, K>(records: I, key_fn: F) -> Counts
where
    I: IntoIterator,
    F: Fn(I::Item) -> Option<K>,
    K: AsRef<str>,
{
    let mut counts = Counts::new();
    for record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };
        let key = key.as_ref();
        if key.is_empty() {
            continue;
        }
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// The `n` highest-valued entries, descending
///
/// Stable: equal values keep their map order. Values that do not compare
/// with themselves (NaN) sort last.
pub fn top_n<K, V>(map: &IndexMap<K, V>, n: usize) -> Vec<(K, V)>
where
    K: Clone,
    V: PartialOrd + Copy,
{
    let mut entries: Vec<(K, V)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| match (is_comparable(&a.1), is_comparable(&b.1)) {
        (true, true) => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    });
    entries.truncate(n);
    entries
}

fn is_comparable<V: PartialOrd>(value: &V) -> bool {
    value.partial_cmp(value).is_some()
}

/// Arithmetic mean; exactly 0 for an empty input
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient of two aligned series
///
/// Returns 0 when the series differ in length, are empty, or either one is
/// constant.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.is_empty() {
        return 0.0;
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut num = 0.0;
    let mut den_x = 0.0;
    let mut den_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }

    if den_x == 0.0 || den_y == 0.0 {
        return 0.0;
    }
    num / (den_x * den_y).sqrt()
}
