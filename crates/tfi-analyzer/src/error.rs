use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TEI embed error: {0}")]
    Tei(String),

    #[error("embedding error: {0}")]
    Embedding(String),
}
