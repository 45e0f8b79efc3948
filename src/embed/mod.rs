//! Text embedding capability and vector similarity.
//!
//! The embedding model is an explicit capability injected into the ranker
//! and refiner. It must behave as a pure function: the same texts always
//! produce the same vectors, with one fixed dimensionality per model.
//! Implementations may batch or parallelize internally, but returned
//! vectors must line up index-for-index with the input texts.

mod hashed;

pub use hashed::HashedEmbedder;

use crate::error::{Error, Result};

/// A text embedding model with fixed output dimensionality.
pub trait EmbeddingModel: Send + Sync {
    /// Embed a batch of texts, one vector per input, in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Output vector length, identical for every call.
    fn dimension(&self) -> usize;

    /// Human-readable model name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Embed a batch and verify every vector matches the model's dimension.
///
/// A wrong-sized vector would silently corrupt similarity scores, so it
/// aborts the run instead.
pub fn embed_checked(model: &dyn EmbeddingModel, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    let vectors = model.embed(texts)?;
    if vectors.len() != texts.len() {
        return Err(Error::Embedding(format!(
            "model '{}' returned {} vectors for {} texts",
            model.name(),
            vectors.len(),
            texts.len()
        )));
    }
    let expected = model.dimension();
    for vector in &vectors {
        if vector.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
    }
    Ok(vectors)
}

/// Cosine similarity between two vectors, in [-1, 1].
///
/// Zero vectors score 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 1.0];
        let b = vec![-1.0, -1.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_scale_invariance() {
        // Similarity must not change under positive rescaling of either side.
        let a = vec![0.3, -1.2, 0.7, 2.5];
        let b = vec![1.1, 0.4, -0.6, 0.9];
        let base = cosine_similarity(&a, &b);

        for scale in [0.001_f32, 0.5, 3.0, 1000.0] {
            let a_scaled: Vec<f32> = a.iter().map(|x| x * scale).collect();
            let b_scaled: Vec<f32> = b.iter().map(|x| x * scale).collect();
            assert!((cosine_similarity(&a_scaled, &b) - base).abs() < 1e-4);
            assert!((cosine_similarity(&a, &b_scaled) - base).abs() < 1e-4);
        }
    }

    struct BadModel;

    impl EmbeddingModel for BadModel {
        fn embed(&self, texts: &[String]) -> crate::Result<Vec<Vec<f32>>> {
            // Returns a wrong-sized vector for every input.
            Ok(texts.iter().map(|_| vec![0.0; 3]).collect())
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    #[test]
    fn test_embed_checked_dimension_mismatch() {
        let result = embed_checked(&BadModel, &["hello".to_string()]);
        assert!(matches!(
            result,
            Err(crate::Error::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }
}
