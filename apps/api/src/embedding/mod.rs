//! Text embedding — turns free text into fixed-length dense vectors.
//!
//! `TextEmbedder` is the seam the recommendation engine depends on.
//! - `FastEmbedder`: ONNX sentence-transformer via fastembed, loaded once on first use.
//! - `HashEmbedder`: deterministic feature hashing, no model files (offline / dev).
//!
//! The chosen backend is built once at startup and shared as `Arc<dyn TextEmbedder>`.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::config::Config;

pub mod hash;
pub mod onnx;

pub use hash::HashEmbedder;
pub use onnx::FastEmbedder;

/// Dense vector produced by an embedder. Computed per request, never cached.
pub type EmbeddingVector = Vec<f32>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model failed to initialize: {0}")]
    Init(String),

    #[error("embedding model error: {0}")]
    Model(String),

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub trait TextEmbedder: Send + Sync {
    /// Backend label, for logs and `/health`.
    fn name(&self) -> &'static str;

    fn dimension(&self) -> usize;

    /// Embeds one text. Blank input yields the zero vector of `dimension()`.
    fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError>;

    /// Embeds several texts, preserving order. Model backends override this with batch inference.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Builds the embedder selected by `EMBEDDING_BACKEND`.
pub fn create_embedder(config: &Config) -> Arc<dyn TextEmbedder> {
    match config.embedding_backend.as_str() {
        "hash" => Arc::new(HashEmbedder::new(config.hash_embedding_dimension)),
        "fastembed" => Arc::new(FastEmbedder::new(&config.embedding_model)),
        other => {
            warn!(
                backend = other,
                "Unknown EMBEDDING_BACKEND; using fastembed"
            );
            Arc::new(FastEmbedder::new(&config.embedding_model))
        }
    }
}

pub(crate) fn zero_vector(dimension: usize) -> EmbeddingVector {
    vec![0.0; dimension]
}
