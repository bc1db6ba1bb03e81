//! Error types for the support retrieval engine.

use thiserror::Error;

use deskrelay_embeddings::EmbeddingError;

/// Result type alias for support operations.
pub type Result<T> = std::result::Result<T, SupportError>;

/// Errors that can occur in the support retrieval engine.
#[derive(Error, Debug)]
pub enum SupportError {
    /// The index holds no cases yet; the caller must train first.
    #[error("no support cases trained yet")]
    EmptyIndex,

    /// Query vector dimensionality differs from the stored embeddings.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Training payload where cases and embeddings differ in length.
    #[error("case/embedding count mismatch: {cases} cases, {embeddings} embeddings")]
    CaseCountMismatch { cases: usize, embeddings: usize },

    /// Embedding backend or vector math failure.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}

impl SupportError {
    /// Whether the caller can recover by retrying or training first.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SupportError::EmptyIndex => true,
            SupportError::Embedding(e) => e.is_recoverable(),
            _ => false,
        }
    }
}
