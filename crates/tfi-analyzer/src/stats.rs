//! Rating statistics on a 1–5 scale.

use std::collections::BTreeMap;

use serde::Serialize;
use tfi_core::{Column, Table};

use crate::grouper::{Theme, ThemeSection};

const RATING_MIN: f64 = 1.0;
const RATING_MAX: f64 = 5.0;

/// Descriptive statistics for one rating question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStat {
    pub question: String,
    /// Arithmetic mean, rounded to 2 dp.
    pub mean: f64,
    /// Population standard deviation, rounded to 2 dp.
    pub std: f64,
    /// Occurrences of each integer rating 1..=5; all five keys always present.
    pub counts: BTreeMap<u8, usize>,
    /// Number of in-range values the statistics were computed over.
    pub responses: usize,
}

/// Pooled statistics for all questions assigned to one theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionStat {
    pub theme: Theme,
    pub questions: Vec<String>,
    pub mean: f64,
    pub std: f64,
    pub counts: BTreeMap<u8, usize>,
    pub responses: usize,
}

struct Summary {
    mean: f64,
    std: f64,
    counts: BTreeMap<u8, usize>,
    responses: usize,
}

/// Compute statistics for each rating column, in the order given.
///
/// Columns that are missing from the table or have no values in `[1, 5]` are
/// left out of the result.
#[must_use]
pub fn compute_stats(table: &Table, rating_cols: &[String]) -> Vec<RatingStat> {
    rating_cols
        .iter()
        .filter_map(|label| {
            let Some(column) = table.column(label) else {
                tracing::warn!(column = %label, "rating column not found in table");
                return None;
            };
            let values = in_range_values(column);
            let Some(summary) = summarize_values(&values) else {
                tracing::debug!(column = %label, "no ratings in range; skipping");
                return None;
            };
            Some(RatingStat {
                question: label.clone(),
                mean: summary.mean,
                std: summary.std,
                counts: summary.counts,
                responses: summary.responses,
            })
        })
        .collect()
}

/// Pool the in-range values of every question in each section.
///
/// Sections whose questions contribute no values are omitted.
#[must_use]
pub fn compute_section_stats(table: &Table, sections: &[ThemeSection]) -> Vec<SectionStat> {
    sections
        .iter()
        .filter_map(|section| {
            let pooled: Vec<f64> = section
                .questions
                .iter()
                .filter_map(|label| table.column(label))
                .flat_map(in_range_values)
                .collect();
            let summary = summarize_values(&pooled)?;
            Some(SectionStat {
                theme: section.theme,
                questions: section.questions.clone(),
                mean: summary.mean,
                std: summary.std,
                counts: summary.counts,
                responses: summary.responses,
            })
        })
        .collect()
}

/// Numeric values of `column` restricted to the closed range `[1, 5]`.
#[must_use]
pub fn in_range_values(column: &Column) -> Vec<f64> {
    column
        .numeric_values()
        .into_iter()
        .filter(|v| (RATING_MIN..=RATING_MAX).contains(v))
        .collect()
}

/// Mean of per-question means, rounded to 2 dp. `None` when there are no stats.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn global_average(stats: &[RatingStat]) -> Option<f64> {
    if stats.is_empty() {
        return None;
    }
    let total: f64 = stats.iter().map(|s| s.mean).sum();
    Some(round2(total / stats.len() as f64))
}

/// In-range non-integer values (e.g. 2.5) count toward mean and std but
/// land in no histogram bucket.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn summarize_values(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mut counts: BTreeMap<u8, usize> = (1..=5).map(|k| (k, 0)).collect();
    for v in values {
        if v.fract() == 0.0 {
            if let Some(count) = counts.get_mut(&(*v as u8)) {
                *count += 1;
            }
        }
    }

    Some(Summary {
        mean: round2(mean),
        std: round2(variance.sqrt()),
        counts,
        responses: values.len(),
    })
}

/// Round the stored binary value to two decimal places, ties to even.
///
/// `value * 100.0` can itself round onto a midpoint (2.675 is stored just below
/// 2.675 but scales to exactly 267.5), so a midpoint is only treated as a tie
/// when the fused product error shows the scaling was exact.
fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    let rounded = if scaled.fract().abs() == 0.5 {
        let error = value.mul_add(100.0, -scaled);
        if error > 0.0 {
            scaled.ceil()
        } else if error < 0.0 {
            scaled.floor()
        } else {
            scaled.round_ties_even()
        }
    } else {
        scaled.round()
    };
    rounded / 100.0
}
