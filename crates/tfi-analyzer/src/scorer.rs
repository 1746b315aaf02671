//! Lexicon-based sentiment tagging for free-text feedback.

use serde::Serialize;

pub(crate) const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "helpful",
    "satisfied",
    "perfect",
    "yes",
];

pub(crate) const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "unhelpful",
    "slow",
    "boring",
    "confusing",
    "no",
    "disappointed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Tag a text as positive, negative or neutral.
///
/// Each lexicon word scores one point if it occurs anywhere in the lower-cased
/// text as a substring, so "no" also matches inside "know" and "not". The side
/// with the strictly higher score wins; equal scores are neutral.
#[must_use]
pub fn classify_sentiment(text: &str) -> Sentiment {
    let text = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| text.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| text.contains(*w)).count();

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Count of each sentiment over a text column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentTally {
    /// Tag every text and tally the labels.
    #[must_use]
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut tally = Self::default();
        for text in texts {
            tally.record(classify_sentiment(text.as_ref()));
        }
        tally
    }

    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}
