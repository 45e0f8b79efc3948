//! Deterministic feature-hashed bag-of-words embedder.
//!
//! A lightweight offline stand-in for a sentence-transformer model: each
//! lowercased alphanumeric token is hashed into a fixed number of buckets
//! with a sign bit, and the resulting vector is L2-normalized. Texts that
//! share vocabulary land near each other under cosine similarity, which is
//! enough for relevance ranking without model weights on disk.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rayon::prelude::*;

use crate::embed::EmbeddingModel;
use crate::error::Result;

/// Default embedding width, matching compact sentence-transformer models.
pub const DEFAULT_DIMENSION: usize = 384;

/// Feature-hashing embedder. Pure and deterministic: `DefaultHasher::new()`
/// uses fixed keys, so identical text always yields identical vectors.
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    dimension: usize,
}

impl HashedEmbedder {
    /// Create an embedder with the default dimension.
    pub fn new() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }

    /// Create an embedder with a custom dimension (must be non-zero).
    pub fn with_dimension(dimension: usize) -> Self {
        assert!(dimension > 0, "embedding dimension must be non-zero");
        Self { dimension }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];

        for token in tokenize(text) {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let h = hasher.finish();

            let bucket = (h % self.dimension as u64) as usize;
            // One hash bit decides the sign, which keeps unrelated tokens
            // from accumulating into a positive bias.
            let sign = if h & (1 << 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingModel for HashedEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        // par_iter preserves input order on collect, so batched vectors
        // stay aligned with their texts.
        Ok(texts
            .par_iter()
            .map(|text| self.embed_one(text))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "hashed-bow"
    }
}

/// Lowercased alphanumeric tokens of a text.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}
