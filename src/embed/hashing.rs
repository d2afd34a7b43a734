//! Feature-hashed bag-of-words embeddings

use super::{is_stop_word, Embedder, ProviderError, ProviderResult};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Deterministic embedder: each content word is hashed into one of
/// `dimension` buckets with a hash-derived sign, then the vector is scaled
/// to unit length. Texts sharing vocabulary end up with high cosine
/// similarity.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> ProviderResult<Self> {
        if dimension == 0 {
            return Err(ProviderError::ConfigError(
                "embedding dimension must be positive".to_string(),
            ));
        }
        Ok(Self { dimension })
    }

    fn bucket(&self, word: &str) -> (usize, f32) {
        let mut hasher = FxHasher::default();
        word.hash(&mut hasher);
        let hash = hasher.finish();
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        ((hash % self.dimension as u64) as usize, sign)
    }
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> ProviderResult<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension];

        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .filter(|w| !is_stop_word(w))
        {
            let (bucket, sign) = self.bucket(&word);
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in vector.iter_mut() {
                *x /= norm;
            }
        }
        Ok(vector)
    }
}
