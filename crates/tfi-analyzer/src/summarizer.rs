//! Condense free-text feedback into a short list of distinct suggestions.

use crate::embeddings::{cosine_similarity, embed_checked, Embedder};
use crate::error::AnalyzerError;

/// Returned instead of an empty list when nothing substantive survives filtering.
pub const NO_SUGGESTIONS: &str = "No detailed suggestions provided.";

/// Maximum number of points kept per column.
pub const MAX_POINTS: usize = 10;

/// Points more similar than this to an already accepted point are dropped.
pub const DUPLICATE_THRESHOLD: f32 = 0.92;

const MIN_POINT_WORDS: usize = 2;

/// Low-information replies, compared against the lower-cased trimmed fragment.
const IGNORE_LIST: &[&str] = &[
    "na", "n/a", "no", "nothing", "none", "nil", ".", "good", "ok", "nice", "yes",
];

/// Summarize a column's free-text entries.
///
/// Entries are split into fragments on line breaks, `|` and `•`; fragments
/// shorter than two words or matching the ignore list are dropped. The rest
/// are embedded in a single batch and kept greedily in input order unless
/// they are near-duplicates of an earlier kept point. At most
/// [`MAX_POINTS`] are returned. When nothing survives filtering the result is
/// `[NO_SUGGESTIONS]`.
///
/// # Errors
///
/// Propagates embedding failures. Malformed text never errors.
pub async fn summarize<E: Embedder>(
    entries: &[String],
    embedder: &E,
) -> Result<Vec<String>, AnalyzerError> {
    let points = extract_points(entries);
    if points.is_empty() {
        return Ok(vec![NO_SUGGESTIONS.to_string()]);
    }

    let texts: Vec<&str> = points.iter().map(String::as_str).collect();
    let embeddings = embed_checked(embedder, &texts).await?;
    let kept = dedup_greedy(points, &embeddings, DUPLICATE_THRESHOLD, MAX_POINTS);

    tracing::debug!(kept = kept.len(), "feedback summarized");
    Ok(kept)
}

/// Split entries into candidate points and drop boilerplate.
#[must_use]
pub fn extract_points<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    entries
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|entry| !entry.trim().is_empty())
        .flat_map(|entry| entry.split(['\n', '|', '•']))
        .map(str::trim)
        .filter(|fragment| fragment.split_whitespace().count() >= MIN_POINT_WORDS)
        .filter(|fragment| !IGNORE_LIST.contains(&fragment.to_lowercase().as_str()))
        .map(str::to_string)
        .collect()
}

/// Keep each point unless its similarity to any kept point exceeds `threshold`.
///
/// Order-preserving; stops once `limit` points are kept, which yields the same
/// result as filtering everything and truncating.
fn dedup_greedy(
    points: Vec<String>,
    embeddings: &[Vec<f32>],
    threshold: f32,
    limit: usize,
) -> Vec<String> {
    let mut kept = Vec::new();
    let mut kept_vectors: Vec<&[f32]> = Vec::new();

    for (point, vector) in points.into_iter().zip(embeddings) {
        if kept.len() == limit {
            break;
        }
        let is_duplicate = kept_vectors
            .iter()
            .any(|accepted| cosine_similarity(vector, accepted) > threshold);
        if is_duplicate {
            tracing::trace!(point = %point, "near-duplicate dropped");
            continue;
        }
        kept.push(point);
        kept_vectors.push(vector);
    }

    kept
}
