//! Error types for the Ollama client.

use thiserror::Error;

use deskrelay_embeddings::EmbeddingError;

/// Result type alias for Ollama operations.
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors that can occur talking to the Ollama backend.
#[derive(Error, Debug)]
pub enum OllamaError {
    /// Backend unreachable, timed out, or returned a non-success status.
    #[error("ollama unavailable: {0}")]
    Unavailable(String),

    /// Backend returned non-JSON or a body missing an expected field.
    #[error("malformed ollama response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for OllamaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            OllamaError::MalformedResponse(err.to_string())
        } else {
            // Connect failures, timeouts, and builder errors all mean the
            // backend could not be used.
            OllamaError::Unavailable(err.to_string())
        }
    }
}

impl From<OllamaError> for EmbeddingError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::Unavailable(details) => EmbeddingError::Unavailable(details),
            OllamaError::MalformedResponse(details) => EmbeddingError::MalformedResponse(details),
        }
    }
}
