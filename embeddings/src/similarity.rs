//! Similarity computation for embeddings.

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors
/// - -1.0 means opposite direction
///
/// The computation divides by both magnitudes, so it stays correct even when
/// a caller hands in vectors that are not unit-norm yet.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (magnitude_a * magnitude_b))
}

/// Compute the dot product between two embeddings.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Normalize an embedding to unit L2 length in place.
///
/// A zero-norm vector has no direction; rejecting it here keeps NaN out of
/// every similarity downstream.
pub fn normalize(embedding: &mut Embedding) -> Result<()> {
    let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude == 0.0 {
        return Err(EmbeddingError::ZeroNorm);
    }
    for x in embedding.iter_mut() {
        *x /= magnitude;
    }
    Ok(())
}

/// Return a unit-norm copy of the given vector.
pub fn normalized(embedding: &[f32]) -> Result<Embedding> {
    let mut out = embedding.to_vec();
    normalize(&mut out)?;
    Ok(out)
}
