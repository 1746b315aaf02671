//! Schema-free column classification.
//!
//! Each column is assigned to exactly one of rating / text / ignored. Rules are
//! evaluated in priority order and the first match wins:
//!
//! 1. numbered question label (`"3. ..."`) whose coerced values are all ≤ 100
//! 2. metadata keyword as a whole word in the label
//! 3. numeric column with few distinct values, max ≤ 100
//! 4. text column whose non-empty cells average more than two words

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tfi_core::{Column, ColumnValues};

static NUMBERED_QUESTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid regex"));

/// Whole-word match so "provided" is not mistaken for "id".
static METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:name|id|email|phone|contact|mobile|date|timestamp|designation)\b")
        .expect("valid regex")
});

/// Rating scales are low-cardinality; anything with this many distinct values is not one.
const MAX_DISTINCT_RATINGS: usize = 15;
const MAX_RATING_VALUE: f64 = 100.0;
const MIN_MEAN_TEXT_WORDS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnClass {
    Rating,
    Text,
    Ignored,
}

/// Total partition of a table's columns by label, each list in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnPartition {
    pub rating: Vec<String>,
    pub text: Vec<String>,
    pub ignored: Vec<String>,
}

impl ColumnPartition {
    /// Total number of classified columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rating.len() + self.text.len() + self.ignored.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition columns into rating, text and ignored buckets.
#[must_use]
pub fn classify(columns: &[Column]) -> ColumnPartition {
    let mut partition = ColumnPartition::default();

    for column in columns {
        let class = classify_column(column);
        tracing::debug!(column = column.label(), ?class, "column classified");
        let bucket = match class {
            ColumnClass::Rating => &mut partition.rating,
            ColumnClass::Text => &mut partition.text,
            ColumnClass::Ignored => &mut partition.ignored,
        };
        bucket.push(column.label().to_string());
    }

    partition
}

/// Classify a single column from its label and values.
#[must_use]
pub fn classify_column(column: &Column) -> ColumnClass {
    let label = column.label();

    if NUMBERED_QUESTION_RE.is_match(label) {
        let values = column.numeric_values();
        if max_value(&values).is_some_and(|max| max <= MAX_RATING_VALUE) {
            return ColumnClass::Rating;
        }
    }

    if METADATA_RE.is_match(&label.to_lowercase()) {
        return ColumnClass::Ignored;
    }

    match column.values() {
        ColumnValues::Numeric(_) => {
            let values = column.numeric_values();
            let few_distinct = distinct_count(&values) < MAX_DISTINCT_RATINGS;
            let bounded = max_value(&values).is_some_and(|max| max <= MAX_RATING_VALUE);
            if few_distinct && bounded {
                ColumnClass::Rating
            } else {
                ColumnClass::Ignored
            }
        }
        ColumnValues::Text(_) => match mean_word_count(&column.text_values()) {
            Some(mean) if mean > MIN_MEAN_TEXT_WORDS => ColumnClass::Text,
            _ => ColumnClass::Ignored,
        },
    }
}

fn max_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

#[allow(clippy::cast_precision_loss)]
fn mean_word_count(texts: &[String]) -> Option<f64> {
    if texts.is_empty() {
        return None;
    }
    let words: usize = texts.iter().map(|t| t.split_whitespace().count()).sum();
    Some(words as f64 / texts.len() as f64)
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
