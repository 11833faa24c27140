use std::cmp::Ordering;

use serde::Serialize;
use tracing::warn;

/// A candidate identifier paired with its similarity to the query, in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate<K> {
    pub id: K,
    pub score: f32,
}

/// Cosine similarity in [-1.0, 1.0].
///
/// Returns 0.0 when either vector has zero magnitude, when the dimensions
/// differ, or when the result is not finite.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let sim = dot / (norm_a * norm_b);
    if !sim.is_finite() {
        return 0.0;
    }
    sim.clamp(-1.0, 1.0)
}

/// Scores every candidate against `query` and orders them by descending score.
///
/// The sort is stable: equal scores keep their input order.
pub fn rank<K: Clone>(query: &[f32], candidates: &[(K, Vec<f32>)]) -> Vec<ScoredCandidate<K>> {
    let mut scored: Vec<ScoredCandidate<K>> = candidates
        .iter()
        .map(|(id, vector)| ScoredCandidate {
            id: id.clone(),
            score: cosine_similarity(query, vector),
        })
        .collect();

    // scores are always finite, so partial_cmp never yields None
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}
