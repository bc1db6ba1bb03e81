//! HTTP request handlers.
//!
//! The relay exposes two groups of endpoints: thin proxies in front of the
//! local Ollama backend (`/generate`, `/embeddings`) and the support-case
//! retrieval surface (`/train-support`, `/get-similar-cases`,
//! `/order-status/{order_id}`).

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use deskrelay_embeddings::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use deskrelay_orders::StatusReport;
use deskrelay_support::{SearchOutcome, SupportCase, SupportError};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QueryInput {
    pub text: String,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    pub use_gpu: Option<bool>,
}

fn default_max_length() -> usize {
    50
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingInput {
    pub texts: Vec<String>,
    pub use_gpu: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct TrainInput {
    pub cases: Vec<SupportCase>,
    pub use_gpu: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarCasesInput {
    pub text: String,
    pub top_k: Option<usize>,
    pub use_gpu: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generated_text: String,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingsResponse {
    pub embeddings: Vec<EmbeddingResponse>,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub status: String,
    pub total_cases: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Service banner with the active models and training state.
pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = state.ollama.config();
    Json(json!({
        "message": "Support desk relay running",
        "llm_model": config.llm_model,
        "embedding_model": config.embedding_model,
        "gpu_enabled": config.use_gpu,
        "trained_cases": state.engine.case_count().await,
    }))
}

/// Proxy text generation to the Ollama backend.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(query): Json<QueryInput>,
) -> Result<Json<GenerateResponse>, ApiError> {
    info!(
        "Generate: {} chars, max_length={}",
        query.text.len(),
        query.max_length
    );

    let use_gpu = query.use_gpu.unwrap_or(state.ollama.config().use_gpu);
    let generated_text = state.ollama.generate_with(&query.text, use_gpu).await?;

    Ok(Json(GenerateResponse { generated_text }))
}

/// Proxy embedding generation to the Ollama backend, one text at a time.
pub async fn embeddings(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EmbeddingInput>,
) -> Result<Json<EmbeddingsResponse>, ApiError> {
    info!("Embeddings: {} texts", input.texts.len());

    let mut results = Vec::with_capacity(input.texts.len());
    for text in &input.texts {
        let mut request = EmbeddingRequest::new(text.clone());
        if let Some(gpu) = input.use_gpu {
            request = request.with_gpu(gpu);
        }
        let response = state
            .ollama
            .embed(request)
            .await
            .map_err(SupportError::from)?;
        results.push(response);
    }

    Ok(Json(EmbeddingsResponse {
        embeddings: results,
    }))
}

/// Train the retrieval engine on a batch of support cases.
pub async fn train_support(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TrainInput>,
) -> Result<Json<TrainResponse>, ApiError> {
    info!("Training on {} support cases", input.cases.len());

    let total_cases = state.engine.train(input.cases, input.use_gpu).await?;

    Ok(Json(TrainResponse {
        status: "trained".to_string(),
        total_cases,
    }))
}

/// Retrieve the support cases most similar to the query text.
pub async fn get_similar_cases(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SimilarCasesInput>,
) -> Result<Json<SearchOutcome>, ApiError> {
    info!("Similar cases: '{}', top_k={:?}", input.text, input.top_k);

    let outcome = state
        .engine
        .find_similar(&input.text, input.top_k, input.use_gpu)
        .await?;

    Ok(Json(outcome))
}

/// Status report for a single order.
pub async fn order_status(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<StatusReport>, ApiError> {
    state
        .engine
        .order_status(&order_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("order {order_id} not found")))
}
