use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::{zero_vector, EmbeddingError, EmbeddingVector, TextEmbedder};

// Changing either key changes every vector this backend produces.
const HASH_SEED_K0: u64 = 0x6a6f_6262_6f61_7264;
const HASH_SEED_K1: u64 = 0x7265_636f_6d6d_656e;

pub const DEFAULT_HASH_DIMENSION: usize = 384;

/// Feature-hashing embedder: lowercase word tokens hashed into signed buckets,
/// then L2-normalized. Deterministic across processes and Rust versions.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash(&self, token: &str, salt: u8) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        salt.hash(&mut hasher);
        token.hash(&mut hasher);
        hasher.finish()
    }
}

impl TextEmbedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        let mut vector = zero_vector(self.dimension);

        for token in tokenize(text) {
            let idx = (self.hash(&token, 0) % self.dimension as u64) as usize;
            let sign = if self.hash(&token, 1) % 2 == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        Ok(vector)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}
