//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur in the embeddings system.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Upstream backend unreachable, timed out, or returned a non-success
    /// status.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// Upstream returned a body that could not be interpreted.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Dimension mismatch between two vectors.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A vector with zero L2 norm cannot be normalized.
    #[error("cannot normalize a zero-norm vector")]
    ZeroNorm,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EmbeddingError {
    /// Whether the caller can reasonably retry the failed operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EmbeddingError::Unavailable(_) | EmbeddingError::MalformedResponse(_)
        )
    }
}
