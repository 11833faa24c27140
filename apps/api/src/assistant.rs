//! Assistant — the public entry point of the AI subsystem.
//!
//! Generation: remote first, deterministic fallback on any failure. The caller
//! always gets usable text; `provenance` tells remote and fallback apart.
//!
//! Recommendation: delegated to `RecommendationEngine`, which degrades to
//! catalog order instead of erroring.

use std::sync::Arc;

use tracing::{info, warn};

use crate::generation::fallback::{compose_chat_reply, compose_cover_letter};
use crate::generation::{
    ChatRequest, CoverLetterRequest, GenerationRequest, GenerationResult, TextGenerator,
};
use crate::models::job::JobDocument;
use crate::recommendation::{RecommendationEngine, DEFAULT_RECOMMENDATION_LIMIT};

pub struct Assistant {
    generator: Arc<dyn TextGenerator>,
    recommender: RecommendationEngine,
    default_limit: usize,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>, recommender: RecommendationEngine) -> Self {
        Self {
            generator,
            recommender,
            default_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn embedder_name(&self) -> &'static str {
        self.recommender.embedder_name()
    }

    pub async fn request_cover_letter(&self, request: CoverLetterRequest) -> GenerationResult {
        self.generate_or_fallback(GenerationRequest::CoverLetter(request))
            .await
    }

    pub async fn request_chat_reply(&self, request: ChatRequest) -> GenerationResult {
        self.generate_or_fallback(GenerationRequest::Chat(request))
            .await
    }

    /// Ranks `jobs` against `skills`; `limit` defaults to the configured limit.
    pub async fn request_recommendations(
        &self,
        skills: &str,
        jobs: Vec<JobDocument>,
        limit: Option<usize>,
    ) -> Vec<JobDocument> {
        let limit = limit.unwrap_or(self.default_limit);
        self.recommender.recommend(skills, jobs, limit).await
    }

    async fn generate_or_fallback(&self, request: GenerationRequest) -> GenerationResult {
        let kind = request.kind();

        match self.generator.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(kind = kind.as_str(), provenance = "remote", "Generated text");
                GenerationResult::remote(text)
            }
            outcome => {
                if outcome.is_ok() {
                    warn!(kind = kind.as_str(), "Generator returned blank text");
                }
                let text = match &request {
                    GenerationRequest::CoverLetter(r) => compose_cover_letter(&r.profile),
                    GenerationRequest::Chat(r) => compose_chat_reply(&r.message),
                };
                info!(kind = kind.as_str(), provenance = "fallback", "Generated text");
                GenerationResult::fallback(text)
            }
        }
    }
}
