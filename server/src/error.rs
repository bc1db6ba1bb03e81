//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use deskrelay_embeddings::EmbeddingError;
use deskrelay_ollama::OllamaError;
use deskrelay_support::SupportError;

/// Error type returned by request handlers.
#[derive(Debug)]
pub enum ApiError {
    Support(SupportError),
    Ollama(OllamaError),
    NotFound(String),
}

impl From<SupportError> for ApiError {
    fn from(err: SupportError) -> Self {
        ApiError::Support(err)
    }
}

impl From<OllamaError> for ApiError {
    fn from(err: OllamaError) -> Self {
        ApiError::Ollama(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Support(SupportError::EmptyIndex) => StatusCode::CONFLICT,
            ApiError::Support(
                SupportError::DimensionMismatch { .. } | SupportError::CaseCountMismatch { .. },
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Support(SupportError::Embedding(err)) => embedding_status(err),
            ApiError::Ollama(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Support(err) => err.to_string(),
            ApiError::Ollama(err) => err.to_string(),
            ApiError::NotFound(msg) => msg.clone(),
        }
    }
}

fn embedding_status(err: &EmbeddingError) -> StatusCode {
    match err {
        EmbeddingError::Unavailable(_) | EmbeddingError::MalformedResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
        EmbeddingError::DimensionMismatch { .. } | EmbeddingError::ZeroNorm => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EmbeddingError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        error!("Request failed ({status}): {message}");
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_index_maps_to_conflict() {
        let err = ApiError::from(SupportError::EmptyIndex);
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn payload_mismatches_map_to_unprocessable() {
        let err = ApiError::from(SupportError::CaseCountMismatch {
            cases: 2,
            embeddings: 1,
        });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = ApiError::from(SupportError::DimensionMismatch {
            expected: 768,
            actual: 4,
        });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unreachable_backend_maps_to_bad_gateway() {
        let err = ApiError::from(SupportError::Embedding(EmbeddingError::Unavailable(
            "connection refused".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(OllamaError::Unavailable("timeout".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unknown_order_maps_to_not_found() {
        let err = ApiError::NotFound("order ORD999999 not found".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
