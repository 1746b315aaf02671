//! Report rendering for the `analyze` command.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use tfi_analyzer::{AnalysisReport, ColumnPartition, RatingStat, SectionStat};

/// Render a report as a markdown document.
pub(crate) fn render_markdown(
    report: &AnalysisReport,
    source: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let overview = &report.overview;

    let _ = writeln!(out, "# Training Feedback Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "**Source**: {source}");
    let _ = writeln!(
        out,
        "**Generated**: {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "## Overview");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Total responses: {}", overview.total_responses);
    let _ = writeln!(
        out,
        "- Rating questions analyzed: {}",
        overview.rating_questions_analyzed
    );
    match overview.global_average {
        Some(avg) => {
            let _ = writeln!(out, "- Global average score: {avg:.2} / 5");
        }
        None => {
            let _ = writeln!(out, "- Global average score: n/a");
        }
    }
    if !report.partition.ignored.is_empty() {
        let _ = writeln!(
            out,
            "- Ignored columns: {}",
            report.partition.ignored.join(", ")
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Question Ratings");
    let _ = writeln!(out);
    if report.question_stats.is_empty() {
        let _ = writeln!(out, "No rating data available.");
    } else {
        let _ = writeln!(out, "| Question | Mean | Std Dev | 1s | 2s | 3s | 4s | 5s |");
        let _ = writeln!(out, "|----------|------|---------|----|----|----|----|----|");
        for stat in &report.question_stats {
            write_stat_row(&mut out, &stat.question, stat);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Section Performance");
    let _ = writeln!(out);
    if report.sections.is_empty() {
        let _ = writeln!(out, "No questions to group.");
    } else {
        for section in &report.sections {
            let _ = writeln!(out, "**{}**", section.theme);
            for question in &section.questions {
                let _ = writeln!(out, "- {question}");
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "| Section | Mean | Std Dev | 1s | 2s | 3s | 4s | 5s |");
        let _ = writeln!(out, "|---------|------|---------|----|----|----|----|----|");
        for stat in &report.section_stats {
            write_section_row(&mut out, stat);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Text Feedback");
    if report.text_insights.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No text-based feedback columns detected.");
    }
    for insight in &report.text_insights {
        let sentiment = &insight.sentiment;
        let _ = writeln!(out);
        let _ = writeln!(out, "### {}", insight.column);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "**Sentiment**: {} positive, {} negative, {} neutral",
            sentiment.positive, sentiment.negative, sentiment.neutral
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "**Key suggestions**:");
        for point in &insight.summary {
            let _ = writeln!(out, "- {point}");
        }
    }

    out
}

/// Render the column partition for the `classify` command.
pub(crate) fn render_partition(partition: &ColumnPartition) -> String {
    let mut out = String::new();
    for (heading, labels) in [
        ("RATING", &partition.rating),
        ("TEXT", &partition.text),
        ("IGNORED", &partition.ignored),
    ] {
        let _ = writeln!(out, "{heading} ({})", labels.len());
        for label in labels {
            let _ = writeln!(out, "  {label}");
        }
    }
    out
}

fn write_stat_row(out: &mut String, label: &str, stat: &RatingStat) {
    let _ = write!(out, "| {} | {:.2} | {:.2} |", escape_cell(label), stat.mean, stat.std);
    for count in stat.counts.values() {
        let _ = write!(out, " {count} |");
    }
    let _ = writeln!(out);
}

fn write_section_row(out: &mut String, stat: &SectionStat) {
    let _ = write!(out, "| {} | {:.2} | {:.2} |", stat.theme, stat.mean, stat.std);
    for count in stat.counts.values() {
        let _ = write!(out, " {count} |");
    }
    let _ = writeln!(out);
}

/// Pipes inside a label would split the table cell.
fn escape_cell(label: &str) -> String {
    label.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tfi_analyzer::{analyze, HashingEmbedder};
    use tfi_core::{Column, Table};

    use super::*;

    async fn sample_report() -> AnalysisReport {
        let table = Table::new(vec![
            Column::numeric("Participant Name", [None, None]),
            Column::numeric("1. Trainer knowledge | depth", [Some(5.0), Some(4.0)]),
            Column::text(
                "Comments",
                [Some("More hands on exercises"), Some("Slides were hard to read")],
            ),
        ]);
        analyze(&table, &HashingEmbedder::new(64))
            .await
            .expect("analysis should succeed")
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn markdown_contains_every_section() {
        let report = sample_report().await;
        let md = render_markdown(&report, "survey.csv", fixed_time());

        assert!(md.starts_with("# Training Feedback Report\n"));
        assert!(md.contains("**Source**: survey.csv"));
        assert!(md.contains("**Generated**: 2024-03-01 09:30 UTC"));
        assert!(md.contains("- Total responses: 2"));
        assert!(md.contains("- Global average score: 4.50 / 5"));
        assert!(md.contains("- Ignored columns: Participant Name"));
        assert!(md.contains("| 1. Trainer knowledge \\| depth | 4.50 | 0.50 | 0 | 0 | 0 | 1 | 1 |"));
        assert!(md.contains("### Comments"));
        assert!(md.contains("- More hands on exercises"));
    }

    #[test]
    fn markdown_handles_an_empty_report() {
        let report = AnalysisReport {
            overview: tfi_analyzer::Overview {
                total_responses: 0,
                rating_questions_analyzed: 0,
                global_average: None,
            },
            partition: ColumnPartition::default(),
            question_stats: Vec::new(),
            sections: Vec::new(),
            section_stats: Vec::new(),
            text_insights: Vec::new(),
        };
        let md = render_markdown(&report, "empty.csv", fixed_time());

        assert!(md.contains("- Global average score: n/a"));
        assert!(md.contains("No rating data available."));
        assert!(md.contains("No questions to group."));
        assert!(md.contains("No text-based feedback columns detected."));
        assert!(!md.contains("Ignored columns"));
    }

    #[test]
    fn partition_lists_each_bucket() {
        let partition = ColumnPartition {
            rating: vec!["1. Pace".to_string()],
            text: Vec::new(),
            ignored: vec!["Email".to_string(), "Date".to_string()],
        };
        let rendered = render_partition(&partition);
        assert_eq!(
            rendered,
            "RATING (1)\n  1. Pace\nTEXT (0)\nIGNORED (2)\n  Email\n  Date\n"
        );
    }
}
