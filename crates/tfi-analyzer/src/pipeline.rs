//! End-to-end analysis of one survey table.

use tfi_core::Table;

use crate::classifier::classify;
use crate::embeddings::Embedder;
use crate::error::AnalyzerError;
use crate::grouper::group_into_sections;
use crate::scorer::SentimentTally;
use crate::stats::{compute_section_stats, compute_stats, global_average};
use crate::summarizer::summarize;
use crate::types::{AnalysisReport, Overview, TextInsight};

/// Run the full analysis for one table.
///
/// 1. Classify columns into rating, text and ignored.
/// 2. Compute statistics for each rating column.
/// 3. Group the questions that produced statistics into themes.
/// 4. Pool statistics per theme.
/// 5. Tally sentiment and summarize each text column.
///
/// Embedding calls are awaited one after another. The output depends only on
/// the table and the embedder, so a deterministic embedder gives identical
/// reports across runs.
///
/// # Errors
///
/// Returns [`AnalyzerError`] if the embedder fails. Cell content never errors.
pub async fn analyze<E: Embedder>(
    table: &Table,
    embedder: &E,
) -> Result<AnalysisReport, AnalyzerError> {
    let partition = classify(table.columns());
    tracing::info!(
        rating = partition.rating.len(),
        text = partition.text.len(),
        ignored = partition.ignored.len(),
        "columns classified"
    );

    let question_stats = compute_stats(table, &partition.rating);
    tracing::info!(questions = question_stats.len(), "rating statistics computed");

    let questions: Vec<String> = question_stats.iter().map(|s| s.question.clone()).collect();
    let sections = group_into_sections(&questions, embedder).await?;
    let section_stats = compute_section_stats(table, &sections);
    tracing::info!(sections = sections.len(), "questions grouped into themes");

    let mut text_insights = Vec::with_capacity(partition.text.len());
    for label in &partition.text {
        let Some(column) = table.column(label) else {
            continue;
        };
        let entries = column.text_values();
        let sentiment = SentimentTally::from_texts(&entries);
        let summary = summarize(&entries, embedder).await?;
        tracing::debug!(
            column = %label,
            responses = sentiment.total(),
            points = summary.len(),
            "text column analyzed"
        );
        text_insights.push(TextInsight {
            column: label.clone(),
            sentiment,
            summary,
        });
    }
    tracing::info!(columns = text_insights.len(), "text feedback summarized");

    let overview = Overview {
        total_responses: table.row_count(),
        rating_questions_analyzed: question_stats.len(),
        global_average: global_average(&question_stats),
    };

    Ok(AnalysisReport {
        overview,
        partition,
        question_stats,
        sections,
        section_stats,
        text_insights,
    })
}
