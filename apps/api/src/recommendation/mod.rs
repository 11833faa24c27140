// Job recommendation: embeds a skill profile and a job catalog, ranks the
// catalog by cosine similarity. Ranking never fails the caller's request.

pub mod engine;
pub mod handlers;
pub mod similarity;

pub use engine::{RecommendationEngine, DEFAULT_RECOMMENDATION_LIMIT};
