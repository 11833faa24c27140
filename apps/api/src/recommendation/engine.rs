//! Recommendation engine — ranks a job catalog against a candidate's skills.
//!
//! Flow: embed skills → embed each job blob (batch) → cosine rank → top `limit`.
//!
//! Embedding is CPU-bound, so it runs on tokio's blocking pool. Any failure on
//! that path degrades to the first `limit` jobs in catalog order.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::embedding::{EmbeddingError, EmbeddingVector, TextEmbedder};
use crate::models::job::JobDocument;
use crate::recommendation::similarity::{rank, ScoredCandidate};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

#[derive(Clone)]
pub struct RecommendationEngine {
    embedder: Arc<dyn TextEmbedder>,
}

impl RecommendationEngine {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }

    pub fn embedder_name(&self) -> &'static str {
        self.embedder.name()
    }

    /// Returns at most `limit` jobs from `jobs`, most similar to `skills` first.
    ///
    /// An empty catalog yields an empty list. If ranking fails the first
    /// `limit` jobs are returned unranked.
    pub async fn recommend(
        &self,
        skills: &str,
        jobs: Vec<JobDocument>,
        limit: usize,
    ) -> Vec<JobDocument> {
        if jobs.is_empty() || limit == 0 {
            return Vec::new();
        }

        let embedder = Arc::clone(&self.embedder);
        let skills = skills.to_string();
        let texts: Vec<String> = jobs.iter().map(JobDocument::embedding_text).collect();

        let outcome =
            tokio::task::spawn_blocking(move || rank_texts(embedder.as_ref(), &skills, &texts))
                .await;

        match outcome {
            Ok(Ok(ranked)) => {
                debug!(
                    catalog = jobs.len(),
                    limit,
                    top_score = ?ranked.first().map(|c| c.score),
                    embedder = self.embedder.name(),
                    "Ranked job catalog"
                );
                select_ranked(jobs, &ranked, limit)
            }
            Ok(Err(e)) => {
                warn!(
                    error = %e,
                    catalog = jobs.len(),
                    "Job ranking failed; returning catalog order"
                );
                jobs.into_iter().take(limit).collect()
            }
            Err(e) => {
                warn!(
                    error = %e,
                    catalog = jobs.len(),
                    "Job ranking task aborted; returning catalog order"
                );
                jobs.into_iter().take(limit).collect()
            }
        }
    }
}

/// Scores each text against `skills`. Candidate ids are indices into `texts`.
fn rank_texts(
    embedder: &dyn TextEmbedder,
    skills: &str,
    texts: &[String],
) -> Result<Vec<ScoredCandidate<usize>>, EmbeddingError> {
    let query = embedder.embed(skills)?;
    let vectors = embedder.embed_batch(texts)?;

    if vectors.len() != texts.len() {
        return Err(EmbeddingError::Model(format!(
            "embedder returned {} vectors for {} jobs",
            vectors.len(),
            texts.len()
        )));
    }

    let candidates = vectors
        .into_iter()
        .enumerate()
        .map(|(i, vector)| {
            if vector.len() == query.len() {
                Ok((i, vector))
            } else {
                Err(EmbeddingError::DimensionMismatch {
                    expected: query.len(),
                    actual: vector.len(),
                })
            }
        })
        .collect::<Result<Vec<(usize, EmbeddingVector)>, _>>()?;

    Ok(rank(&query, &candidates))
}

/// Moves the top `limit` ranked jobs out of the catalog, in ranked order.
fn select_ranked(
    jobs: Vec<JobDocument>,
    ranked: &[ScoredCandidate<usize>],
    limit: usize,
) -> Vec<JobDocument> {
    let mut slots: Vec<Option<JobDocument>> = jobs.into_iter().map(Some).collect();
    ranked
        .iter()
        .filter_map(|c| slots.get_mut(c.id).and_then(Option::take))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use uuid::Uuid;

    use super::*;
    use crate::embedding::HashEmbedder;

    /// Returns fixed vectors for known texts and a zero vector otherwise.
    struct StubEmbedder {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl StubEmbedder {
        fn new(pairs: &[(&str, Vec<f32>)]) -> Self {
            Self {
                vectors: pairs
                    .iter()
                    .map(|(t, v)| (t.to_string(), v.clone()))
                    .collect(),
            }
        }
    }

    impl TextEmbedder for StubEmbedder {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            Ok(self.vectors.get(text).cloned().unwrap_or_else(|| vec![0.0; 2]))
        }
    }

    struct FailingEmbedder;

    impl TextEmbedder for FailingEmbedder {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            Err(EmbeddingError::Model("runtime error".to_string()))
        }
    }

    struct PanickingEmbedder;

    impl TextEmbedder for PanickingEmbedder {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            panic!("model crashed")
        }
    }

    /// Query embeds to 2 dims, every job to 3.
    struct MismatchedEmbedder;

    impl TextEmbedder for MismatchedEmbedder {
        fn name(&self) -> &'static str {
            "mismatched"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            if text == "Rust" {
                Ok(vec![1.0, 0.0])
            } else {
                Ok(vec![1.0, 0.0, 0.0])
            }
        }
    }

    fn job(title: &str, description: &str, requirements: &[&str]) -> JobDocument {
        JobDocument {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn catalog(n: usize) -> Vec<JobDocument> {
        (0..n)
            .map(|i| job(&format!("Job {i}"), "description", &[]))
            .collect()
    }

    #[tokio::test]
    async fn test_higher_similarity_job_ranks_first() {
        let job_a = job("Backend Developer", "Python Django APIs", &["REST", "SQL"]);
        let job_b = job("Frontend Developer", "React JavaScript", &["CSS"]);
        let text_a = job_a.embedding_text();
        let text_b = job_b.embedding_text();
        let embedder = StubEmbedder::new(&[
            ("Python, Django", vec![1.0, 0.0]),
            (text_a.as_str(), vec![0.9, 0.1]),
            (text_b.as_str(), vec![0.1, 0.9]),
        ]);
        let engine = RecommendationEngine::new(Arc::new(embedder));

        // catalog order is B, A — ranking must flip it
        let result = engine
            .recommend("Python, Django", vec![job_b.clone(), job_a.clone()], 10)
            .await;

        assert_eq!(result, vec![job_a, job_b]);
    }

    #[tokio::test]
    async fn test_empty_catalog_returns_empty() {
        let engine = RecommendationEngine::new(Arc::new(HashEmbedder::new(16)));
        assert!(engine.recommend("Rust", vec![], 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_result_is_bounded_by_limit_and_drawn_from_catalog() {
        let engine = RecommendationEngine::new(Arc::new(HashEmbedder::new(64)));
        let jobs = vec![
            job("Rust Engineer", "Tokio services", &["Rust"]),
            job("Data Scientist", "Pandas notebooks", &["Python"]),
            job("iOS Developer", "Swift apps", &["Swift"]),
            job("Platform Engineer", "Kubernetes Rust tooling", &["Go", "Rust"]),
        ];

        let result = engine.recommend("Rust Tokio", jobs.clone(), 2).await;

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| jobs.contains(r)));
    }

    #[tokio::test]
    async fn test_limit_larger_than_catalog_returns_whole_catalog() {
        let engine = RecommendationEngine::new(Arc::new(HashEmbedder::new(64)));
        let result = engine.recommend("Rust", catalog(3), 10).await;
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn test_zero_limit_returns_empty() {
        let engine = RecommendationEngine::new(Arc::new(HashEmbedder::new(64)));
        assert!(engine.recommend("Rust", catalog(3), 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_falls_back_to_catalog_order() {
        let engine = RecommendationEngine::new(Arc::new(FailingEmbedder));
        let jobs = catalog(12);

        let result = engine.recommend("Rust", jobs.clone(), 10).await;

        assert_eq!(result, jobs[..10].to_vec());
    }

    #[tokio::test]
    async fn test_embedder_panic_falls_back_to_catalog_order() {
        let engine = RecommendationEngine::new(Arc::new(PanickingEmbedder));
        let jobs = catalog(3);

        let result = engine.recommend("Rust", jobs.clone(), 2).await;

        assert_eq!(result, jobs[..2].to_vec());
    }

    #[tokio::test]
    async fn test_dimension_mismatch_falls_back_to_catalog_order() {
        let engine = RecommendationEngine::new(Arc::new(MismatchedEmbedder));
        let jobs = catalog(3);

        let texts: Vec<String> = jobs.iter().map(JobDocument::embedding_text).collect();
        assert!(matches!(
            rank_texts(&MismatchedEmbedder, "Rust", &texts),
            Err(EmbeddingError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert_eq!(engine.recommend("Rust", jobs.clone(), 10).await, jobs);
    }

    #[tokio::test]
    async fn test_blank_skills_keep_catalog_order() {
        // zero query vector scores every job 0.0; the stable sort keeps input order
        let engine = RecommendationEngine::new(Arc::new(HashEmbedder::new(64)));
        let jobs = vec![
            job("Rust Engineer", "Tokio", &[]),
            job("Python Engineer", "Django", &[]),
            job("Go Engineer", "gRPC", &[]),
        ];

        assert_eq!(engine.recommend("", jobs.clone(), 10).await, jobs);
    }

    #[test]
    fn test_ranked_scores_are_non_increasing() {
        let embedder = HashEmbedder::new(128);
        let jobs = vec![
            job("Rust Engineer", "Tokio services", &["Rust"]),
            job("Data Scientist", "Pandas", &["Python"]),
            job("Platform Engineer", "Kubernetes", &["Rust", "Go"]),
            job("Designer", "Figma", &[]),
        ];

        let texts: Vec<String> = jobs.iter().map(JobDocument::embedding_text).collect();
        let ranked = rank_texts(&embedder, "Rust Kubernetes", &texts).unwrap();

        assert_eq!(ranked.len(), jobs.len());
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(ranked.iter().all(|c| (-1.0..=1.0).contains(&c.score)));
    }

    #[test]
    fn test_select_ranked_takes_top_in_order() {
        let jobs = catalog(3);
        let ranked = vec![
            ScoredCandidate { id: 2, score: 0.9 },
            ScoredCandidate { id: 0, score: 0.5 },
            ScoredCandidate { id: 1, score: 0.1 },
        ];

        let selected = select_ranked(jobs.clone(), &ranked, 2);

        assert_eq!(selected, vec![jobs[2].clone(), jobs[0].clone()]);
    }
}
