//! Sentence-embedding providers.
//!
//! The provider is built once at startup and passed by reference to every
//! stage that needs vectors. [`TeiClient`] talks to a Text Embeddings
//! Inference server; [`HashingEmbedder`] is a deterministic offline stand-in.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tfi_core::{AppConfig, EmbedderKind};

use crate::error::AnalyzerError;

/// Turns a batch of texts into one vector per text, in input order.
pub trait Embedder {
    fn embed(
        &self,
        texts: &[&str],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, AnalyzerError>> + Send;
}

/// Embed `texts` and verify the provider returned exactly one vector per input.
pub(crate) async fn embed_checked<E: Embedder>(
    embedder: &E,
    texts: &[&str],
) -> Result<Vec<Vec<f32>>, AnalyzerError> {
    let vectors = embedder.embed(texts).await?;
    if vectors.len() != texts.len() {
        return Err(AnalyzerError::Embedding(format!(
            "provider returned {} embeddings for {} inputs",
            vectors.len(),
            texts.len()
        )));
    }
    Ok(vectors)
}

/// Cosine similarity between two vectors.
///
/// Returns `0.0` for mismatched lengths or a zero-magnitude operand.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// TEI HTTP client.
pub struct TeiClient {
    client: reqwest::Client,
    url: String,
    batch_size: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl TeiClient {
    /// Create a new `TeiClient` posting to `{tei_url}/embed`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(tei_url: &str, timeout_secs: u64, batch_size: usize) -> Result<Self, AnalyzerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tfi/0.1 (feedback-analysis)")
            .build()?;

        Ok(Self {
            client,
            url: format!("{}/embed", tei_url.trim_end_matches('/')),
            batch_size: batch_size.max(1),
        })
    }
}

impl Embedder for TeiClient {
    /// Texts are sent in chunks of `batch_size` per request.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Tei`] if a request fails, the server answers
    /// with a non-success status, or the response cannot be parsed.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AnalyzerError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(self.batch_size) {
            let request = EmbedRequest { inputs: chunk };
            let response = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .map_err(|e| AnalyzerError::Tei(format!("TEI request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(AnalyzerError::Tei(format!(
                    "TEI returned status {}",
                    response.status()
                )));
            }

            let embeddings: Vec<Vec<f32>> = response
                .json()
                .await
                .map_err(|e| AnalyzerError::Tei(format!("TEI response parse error: {e}")))?;

            if embeddings.len() != chunk.len() {
                return Err(AnalyzerError::Tei(format!(
                    "TEI returned {} embeddings for {} inputs",
                    embeddings.len(),
                    chunk.len()
                )));
            }

            tracing::debug!(batch = chunk.len(), "TEI batch embedded");
            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }
}

/// Offline embedder using signed feature hashing of word unigrams and bigrams.
///
/// Vectors are unit-normalised, so texts sharing most of their words score a
/// high cosine similarity. No semantics beyond lexical overlap.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let tokens: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        let mut vector = vec![0.0_f32; self.dimensions];
        for token in &tokens {
            self.accumulate(&mut vector, token, 1.0);
        }
        for pair in tokens.windows(2) {
            self.accumulate(&mut vector, &format!("{} {}", pair[0], pair[1]), 0.5);
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }

    #[allow(clippy::cast_possible_truncation)]
    fn accumulate(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let hash = Sha256::digest(feature.as_bytes());
        let mut bytes = [0_u8; 8];
        bytes.copy_from_slice(&hash[..8]);
        let bucket = (u64::from_be_bytes(bytes) % self.dimensions as u64) as usize;
        let sign = if hash[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

impl Embedder for HashingEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AnalyzerError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

/// Runtime-selected embedding provider.
pub enum EmbeddingBackend {
    Tei(TeiClient),
    Hashing(HashingEmbedder),
}

impl EmbeddingBackend {
    /// Build the backend named by `config.embedder`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the TEI client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalyzerError> {
        match config.embedder {
            EmbedderKind::Tei => {
                tracing::info!(url = %config.tei_url, "using TEI embedding backend");
                let client = TeiClient::new(
                    &config.tei_url,
                    config.tei_timeout_secs,
                    config.tei_batch_size,
                )?;
                Ok(Self::Tei(client))
            }
            EmbedderKind::Hashing => {
                tracing::info!(
                    dimensions = config.hashing_dimensions,
                    "using offline hashing embedding backend"
                );
                Ok(Self::Hashing(HashingEmbedder::new(config.hashing_dimensions)))
            }
        }
    }
}

impl Embedder for EmbeddingBackend {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AnalyzerError> {
        match self {
            Self::Tei(client) => client.embed(texts).await,
            Self::Hashing(hashing) => hashing.embed(texts).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.3, 0.4, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn cosine_handles_zero_and_mismatched_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn hashing_embedder_is_deterministic_and_normalised() {
        let embedder = HashingEmbedder::new(64);
        let first = embedder.embed(&["More hands-on exercises"]).await.unwrap();
        let second = embedder.embed(&["More hands-on exercises"]).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].len(), 64);
        let norm: f32 = first[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[tokio::test]
    async fn hashing_embedder_ignores_case_and_punctuation() {
        let embedder = HashingEmbedder::new(128);
        let vectors = embedder
            .embed(&["Sessions were too long!", "sessions were too long"])
            .await
            .unwrap();
        assert!(cosine_similarity(&vectors[0], &vectors[1]) > 0.999);
    }

    #[tokio::test]
    async fn hashing_embedder_returns_zero_vector_for_blank_text() {
        let embedder = HashingEmbedder::new(16);
        let vectors = embedder.embed(&["  ..  "]).await.unwrap();
        assert!(vectors[0].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn hashing_embedder_clamps_zero_dimensions() {
        assert_eq!(HashingEmbedder::new(0).dimensions(), 1);
    }

    struct ShortEmbedder;

    impl Embedder for ShortEmbedder {
        async fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, AnalyzerError> {
            Ok(vec![vec![1.0]])
        }
    }

    #[tokio::test]
    async fn embed_checked_rejects_count_mismatch() {
        let err = embed_checked(&ShortEmbedder, &["a", "b"]).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Embedding(_)), "got {err:?}");
    }
}
