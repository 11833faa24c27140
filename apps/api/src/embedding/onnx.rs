//! Sentence-transformer embeddings through fastembed's ONNX runtime.
//!
//! The model is downloaded/loaded lazily by the first `embed` call. A `OnceCell`
//! barrier makes concurrent first callers wait for a single initialization; a
//! failed load is reported and attempted again on the next call.

use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

use super::{zero_vector, EmbeddingError, EmbeddingVector, TextEmbedder};

pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm-l6-v2";

pub struct FastEmbedder {
    model: EmbeddingModel,
    model_name: String,
    dimension: usize,
    // inference needs exclusive access to the ONNX session
    session: OnceCell<Mutex<TextEmbedding>>,
}

impl FastEmbedder {
    /// Resolves the model name without loading anything.
    pub fn new(model_name: &str) -> Self {
        let (model, dimension) = parse_embedding_model(model_name);
        Self {
            model,
            model_name: model_name.to_string(),
            dimension,
            session: OnceCell::new(),
        }
    }

    fn session(&self) -> Result<&Mutex<TextEmbedding>, EmbeddingError> {
        self.session.get_or_try_init(|| {
            info!(model = %self.model_name, "Loading sentence embedding model");
            let options = InitOptions::new(self.model.clone()).with_show_download_progress(false);
            let model = TextEmbedding::try_new(options).map_err(|e| {
                warn!(model = %self.model_name, error = %e, "Embedding model failed to load");
                EmbeddingError::Init(e.to_string())
            })?;
            info!(model = %self.model_name, dimension = self.dimension, "Embedding model ready");
            Ok(Mutex::new(model))
        })
    }

    fn infer(&self, texts: Vec<&str>) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        let session = self.session()?;
        let mut model = session
            .lock()
            .map_err(|_| EmbeddingError::Model("embedding session lock poisoned".to_string()))?;

        let vectors = model
            .embed(texts, None)
            .map_err(|e| EmbeddingError::Model(e.to_string()))?;

        for vector in &vectors {
            if vector.len() != self.dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
        }
        Ok(vectors)
    }
}

impl TextEmbedder for FastEmbedder {
    fn name(&self) -> &'static str {
        "fastembed"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        if text.trim().is_empty() {
            return Ok(zero_vector(self.dimension));
        }
        self.infer(vec![text])?
            .pop()
            .ok_or_else(|| EmbeddingError::Model("model returned no vector".to_string()))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        let mut out = vec![zero_vector(self.dimension); texts.len()];

        let (indices, inputs): (Vec<usize>, Vec<&str>) = texts
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.trim().is_empty())
            .map(|(i, t)| (i, t.as_str()))
            .unzip();

        if inputs.is_empty() {
            return Ok(out);
        }

        let expected = inputs.len();
        let vectors = self.infer(inputs)?;
        if vectors.len() != expected {
            return Err(EmbeddingError::Model(format!(
                "model returned {} vectors for {expected} inputs",
                vectors.len()
            )));
        }

        debug!(count = expected, "Embedded batch");
        for (i, vector) in indices.into_iter().zip(vectors) {
            out[i] = vector;
        }
        Ok(out)
    }
}

/// Maps a configured model name to the fastembed model and its output dimension.
fn parse_embedding_model(model_name: &str) -> (EmbeddingModel, usize) {
    match model_name.to_lowercase().as_str() {
        "all-minilm-l6-v2" | "allminilml6v2" => (EmbeddingModel::AllMiniLML6V2, 384),
        "paraphrase-minilm-l12-v2" | "paraphrase-multilingual-minilm-l12-v2" => {
            (EmbeddingModel::ParaphraseMLMiniLML12V2, 384)
        }
        "bge-small-en" | "bge-small-en-v1.5" => (EmbeddingModel::BGESmallENV15, 384),
        "bge-base-en" | "bge-base-en-v1.5" => (EmbeddingModel::BGEBaseENV15, 768),
        other => {
            warn!(model = other, "Unknown embedding model; using all-minilm-l6-v2");
            (EmbeddingModel::AllMiniLML6V2, 384)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_models() {
        assert_eq!(parse_embedding_model("all-minilm-l6-v2").1, 384);
        assert_eq!(parse_embedding_model("BGE-Base-EN").1, 768);
        assert!(matches!(
            parse_embedding_model("paraphrase-minilm-l12-v2").0,
            EmbeddingModel::ParaphraseMLMiniLML12V2
        ));
    }

    #[test]
    fn test_unknown_model_falls_back_to_minilm() {
        let (model, dimension) = parse_embedding_model("no-such-model");
        assert!(matches!(model, EmbeddingModel::AllMiniLML6V2));
        assert_eq!(dimension, 384);
    }

    #[test]
    fn test_blank_text_returns_zero_vector_without_loading_model() {
        let embedder = FastEmbedder::new(DEFAULT_EMBEDDING_MODEL);
        let vector = embedder.embed("   ").unwrap();
        assert_eq!(vector.len(), 384);
        assert!(vector.iter().all(|v| *v == 0.0));
        assert!(
            embedder.session.get().is_none(),
            "blank input must not trigger model load"
        );
    }

    #[test]
    fn test_blank_batch_does_not_load_model() {
        let embedder = FastEmbedder::new(DEFAULT_EMBEDDING_MODEL);
        let vectors = embedder
            .embed_batch(&[String::new(), " ".to_string()])
            .unwrap();
        assert_eq!(vectors.len(), 2);
        assert!(embedder.session.get().is_none());
    }
}
