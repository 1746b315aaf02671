//! Survey feedback analysis pipeline for TFI.
//!
//! Classifies spreadsheet columns into rating questions, free-text feedback or
//! metadata, computes per-question rating statistics, groups questions into
//! thematic sections by embedding similarity, and condenses free-text columns
//! into a sentiment tally plus a short list of de-duplicated suggestions.

pub mod classifier;
pub mod embeddings;
pub mod error;
pub mod grouper;
pub mod pipeline;
pub mod scorer;
pub mod stats;
pub mod summarizer;
pub mod types;

pub use classifier::{classify, classify_column, ColumnClass, ColumnPartition};
pub use embeddings::{cosine_similarity, Embedder, EmbeddingBackend, HashingEmbedder, TeiClient};
pub use error::AnalyzerError;
pub use grouper::{group_into_sections, Theme, ThemeSection};
pub use pipeline::analyze;
pub use scorer::{classify_sentiment, Sentiment, SentimentTally};
pub use stats::{compute_stats, RatingStat, SectionStat};
pub use summarizer::{summarize, NO_SUGGESTIONS};
pub use types::{AnalysisReport, Overview, TextInsight};
