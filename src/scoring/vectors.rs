//! Dense vector similarity.

use crate::error::{EngineError, Result};

/// Cosine similarity between two dense embeddings.
///
/// Returns a value in [-1, 1]; zero-norm vectors yield 0. Mismatched
/// dimensions are a data integrity failure, not a silent 0 — the caller
/// decides how to degrade.
pub fn cosine_dense(a: &[f32], b: &[f32], context: &str) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EngineError::DataIntegrity {
            context: context.to_string(),
            expected: b.len(),
            actual: a.len(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot / (norm_a * norm_b))
    }
}
