//! Analytics Report Generator
//!
//! **Purpose:** Turn the exported tables into the ten-section analytics
//! summary. Section order and wording are fixed; consumers diff the text.
//!
//! Interaction `type` comparisons here are exact. Numeric fields go through
//! [`coerce_number`] and unparsable values are left out of the statistic.

use crate::aggregate::{count_by, mean, pearson_correlation, top_n, Counts};
use indexmap::IndexMap;
use rcp_common::config::AnalyticsConfig;
use rcp_common::numeric::coerce_number;
use rcp_common::{Record, RecordSet};
use std::collections::HashSet;
use std::fmt::Display;

/// First line of every report
pub const REPORT_TITLE: &str = "=== ANALYTICS SUMMARY ===";

/// Section 8 body when no usable rating exists
pub const NO_RATING_DATA: &str = "No rating data available.";

/// Section headers, in emission order
pub const SECTION_HEADERS: [&str; 10] = [
    "1. Most common ingredients:",
    "2. Average preparation time (min):",
    "3. Average cook time (min):",
    "4. Difficulty distribution:",
    "5. Most viewed recipes:",
    "6. Most liked recipes:",
    "7. Recipes with most cook attempts:",
    "8. Average rating per recipe:",
    "9. Correlation between prep time and likes:",
    "10. Ingredients associated with high engagement (top liked recipes):",
];

/// The rendered report as an ordered sequence of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsReport {
    lines: Vec<String>,
}

impl AnalyticsReport {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Lines joined with `\n`, as persisted
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Body lines of section `number` (1-based), without its header
    pub fn section(&self, number: usize) -> Option<&[String]> {
        let header = SECTION_HEADERS.get(number.checked_sub(1)?)?;
        let start = self.lines.iter().position(|l| l == header)? + 1;
        let end = SECTION_HEADERS
            .get(number)
            .and_then(|next| self.lines.iter().position(|l| l == next))
            // the blank separator line before the next header
            .map(|idx| idx - 1)
            .unwrap_or(self.lines.len());
        Some(&self.lines[start..end])
    }
}

/// Accumulates report lines; multi-line text is split so every entry is one line
#[derive(Default)]
struct ReportBuilder {
    lines: Vec<String>,
}

impl ReportBuilder {
    fn add(&mut self, text: &str) {
        self.lines.extend(text.split('\n').map(str::to_string));
    }

    fn section(&mut self, number: usize, body: &str) {
        self.add("");
        self.add(SECTION_HEADERS[number - 1]);
        self.add(body);
    }

    fn finish(self) -> AnalyticsReport {
        AnalyticsReport { lines: self.lines }
    }
}

/// `key: value` lines in the given order
fn pairs_to_string<K: Display, V: Display>(pairs: impl IntoIterator<Item = (K, V)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join("\n")
}

fn top_n_to_string<V: PartialOrd + Copy + Display>(map: &IndexMap<String, V>, n: usize) -> String {
    pairs_to_string(top_n(map, n))
}

/// Count interactions of one exact `type` per `recipe_id`
pub fn interaction_counts(interactions: &[Record], kind: &str) -> Counts {
    count_by(
        interactions.iter().filter(|r| r.text("type") == kind),
        |r| r.get("recipe_id"),
    )
}

/// Mean parsed rating per recipe, first-seen order
///
/// Only `type == "rating"` rows with a non-empty rating that parses count.
/// Returns an empty map when no such rating exists.
pub fn average_ratings(interactions: &[Record]) -> IndexMap<String, f64> {
    let mut by_recipe: IndexMap<String, Vec<f64>> = IndexMap::new();
    for row in interactions {
        if row.text("type") != "rating" || row.is_blank("rating") || row.is_blank("recipe_id") {
            continue;
        }
        if let Some(value) = coerce_number(row.get("rating")) {
            by_recipe
                .entry(row.text("recipe_id").to_string())
                .or_default()
                .push(value);
        }
    }

    by_recipe
        .into_iter()
        .map(|(recipe_id, values)| (recipe_id, mean(&values)))
        .collect()
}

/// Mean of a numeric recipe field, unparsable values excluded
pub fn mean_of_field(recipes: &[Record], field: &str) -> f64 {
    let values: Vec<f64> = recipes
        .iter()
        .filter_map(|r| coerce_number(r.get(field)))
        .collect();
    mean(&values)
}

/// Pearson correlation between each recipe's prep time and its like count
///
/// Recipes whose prep time does not parse drop out of both series; a recipe
/// without likes counts as 0.
pub fn prep_time_like_correlation(recipes: &[Record], likes: &Counts) -> f64 {
    let mut prep_times = Vec::new();
    let mut like_counts = Vec::new();
    for recipe in recipes {
        if let Some(prep) = coerce_number(recipe.get("prep_time_min")) {
            prep_times.push(prep);
            let count = likes.get(recipe.text("recipe_id")).copied().unwrap_or(0);
            like_counts.push(count as f64);
        }
    }
    pearson_correlation(&prep_times, &like_counts)
}

/// Ingredient name counts restricted to the `top` most-liked recipes
pub fn engagement_ingredient_counts(ingredients: &[Record], likes: &Counts, top: usize) -> Counts {
    let top_liked: HashSet<String> = top_n(likes, top).into_iter().map(|(id, _)| id).collect();
    count_by(
        ingredients
            .iter()
            .filter(|r| top_liked.contains(r.text("recipe_id"))),
        |r| r.get("name"),
    )
}

/// Build the ten-section report
pub fn generate_report(records: &RecordSet, options: &AnalyticsConfig) -> AnalyticsReport {
    let n = options.top_n;
    let recipes = &records.recipes;
    let ingredients = &records.ingredients;
    let interactions = &records.interactions;

    let mut report = ReportBuilder::default();
    report.add(REPORT_TITLE);

    let ingredient_counts = count_by(ingredients, |r| r.get("name"));
    report.section(1, &top_n_to_string(&ingredient_counts, n));

    report.section(2, &format!("{:.2}", mean_of_field(recipes, "prep_time_min")));
    report.section(3, &format!("{:.2}", mean_of_field(recipes, "cook_time_min")));

    let difficulty_counts = count_by(recipes, |r| r.get("difficulty"));
    report.section(4, &pairs_to_string(&difficulty_counts));

    let views = interaction_counts(interactions, "view");
    report.section(5, &top_n_to_string(&views, n));

    let likes = interaction_counts(interactions, "like");
    report.section(6, &top_n_to_string(&likes, n));

    let attempts = interaction_counts(interactions, "cook_attempt");
    report.section(7, &top_n_to_string(&attempts, n));

    let ratings = average_ratings(interactions);
    if ratings.is_empty() {
        report.section(8, NO_RATING_DATA);
    } else {
        report.section(8, &top_n_to_string(&ratings, n));
    }

    let correlation = prep_time_like_correlation(recipes, &likes);
    report.section(
        9,
        &format!("Correlation (prep_time_min vs like_count): {:.4}", correlation),
    );

    let engaged = engagement_ingredient_counts(ingredients, &likes, options.engaged_recipes);
    report.section(10, &top_n_to_string(&engaged, n));

    report.finish()
}
