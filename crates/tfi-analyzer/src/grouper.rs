//! Thematic grouping of rating questions by embedding similarity.

use serde::Serialize;

use crate::embeddings::{cosine_similarity, embed_checked, Embedder};
use crate::error::AnalyzerError;

/// Fixed, ordered theme catalogue. Declaration order breaks similarity ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Theme {
    #[serde(rename = "Trainer Rating")]
    TrainerRating,
    #[serde(rename = "Training Effectiveness")]
    TrainingEffectiveness,
    #[serde(rename = "Infrastructure")]
    Infrastructure,
    #[serde(rename = "Engagement")]
    Engagement,
    #[serde(rename = "Overall Satisfaction")]
    OverallSatisfaction,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::TrainerRating,
        Theme::TrainingEffectiveness,
        Theme::Infrastructure,
        Theme::Engagement,
        Theme::OverallSatisfaction,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Theme::TrainerRating => "Trainer Rating",
            Theme::TrainingEffectiveness => "Training Effectiveness",
            Theme::Infrastructure => "Infrastructure",
            Theme::Engagement => "Engagement",
            Theme::OverallSatisfaction => "Overall Satisfaction",
        }
    }

    /// Descriptive sentence embedded as the theme's semantic anchor.
    #[must_use]
    pub fn anchor(self) -> &'static str {
        match self {
            Theme::TrainerRating => {
                "instructor knowledge, delivery, teaching style, quality of delivery"
            }
            Theme::TrainingEffectiveness => {
                "expectations, apply knowledge, objectives, content organized, materials"
            }
            Theme::Infrastructure => "room, infrastructure, time provided, allotment, sufficient time",
            Theme::Engagement => {
                "interaction, participation, encouragement, questions and discussion"
            }
            Theme::OverallSatisfaction => "overall rating, recommend, value",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Questions assigned to one theme, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSection {
    pub theme: Theme,
    pub questions: Vec<String>,
}

/// Assign each question to the theme whose anchor it is most similar to.
///
/// Returns sections in catalogue order, omitting themes with no questions.
/// An empty question list returns immediately without calling the embedder.
///
/// # Errors
///
/// Propagates embedding failures.
pub async fn group_into_sections<E: Embedder>(
    questions: &[String],
    embedder: &E,
) -> Result<Vec<ThemeSection>, AnalyzerError> {
    if questions.is_empty() {
        return Ok(Vec::new());
    }

    let question_texts: Vec<&str> = questions.iter().map(String::as_str).collect();
    let anchor_texts: Vec<&str> = Theme::ALL.iter().map(|t| t.anchor()).collect();

    let question_vectors = embed_checked(embedder, &question_texts).await?;
    let anchor_vectors = embed_checked(embedder, &anchor_texts).await?;

    let mut groups: Vec<Vec<String>> = vec![Vec::new(); Theme::ALL.len()];
    for (question, vector) in questions.iter().zip(&question_vectors) {
        let similarities: Vec<f32> = anchor_vectors
            .iter()
            .map(|anchor| cosine_similarity(vector, anchor))
            .collect();
        let best = stable_argmax(&similarities);
        tracing::debug!(
            question = %question,
            theme = %Theme::ALL[best],
            similarity = similarities[best],
            "question assigned to theme"
        );
        groups[best].push(question.clone());
    }

    Ok(Theme::ALL
        .into_iter()
        .zip(groups)
        .filter(|(_, questions)| !questions.is_empty())
        .map(|(theme, questions)| ThemeSection { theme, questions })
        .collect())
}

/// Index of the largest value; the first one wins on ties.
fn stable_argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = i;
        }
    }
    best
}
