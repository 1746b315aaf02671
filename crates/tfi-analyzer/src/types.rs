use serde::Serialize;

use crate::classifier::ColumnPartition;
use crate::grouper::ThemeSection;
use crate::scorer::SentimentTally;
use crate::stats::{RatingStat, SectionStat};

/// Headline numbers for one survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    /// Number of data rows in the table.
    pub total_responses: usize,
    /// Rating questions that produced statistics.
    pub rating_questions_analyzed: usize,
    /// Mean of per-question means; `None` when no question produced statistics.
    pub global_average: Option<f64>,
}

/// Sentiment tally and condensed suggestions for one free-text column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextInsight {
    pub column: String,
    pub sentiment: SentimentTally,
    pub summary: Vec<String>,
}

/// Everything produced by one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub overview: Overview,
    pub partition: ColumnPartition,
    pub question_stats: Vec<RatingStat>,
    pub sections: Vec<ThemeSection>,
    pub section_stats: Vec<SectionStat>,
    pub text_insights: Vec<TextInsight>,
}

impl AnalysisReport {
    /// Statistics for `question`, if it produced any.
    #[must_use]
    pub fn question_stat(&self, question: &str) -> Option<&RatingStat> {
        self.question_stats.iter().find(|s| s.question == question)
    }
}
