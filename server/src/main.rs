//! Support desk relay.
//!
//! HTTP front for a locally running Ollama server plus an in-memory
//! support-case retrieval engine:
//! - Text generation and embedding proxies
//! - Training on support cases
//! - Similarity search with order-aware answer enrichment
//! - Simulated order status lookup

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use tracing::info;

mod config;
mod error;
mod handlers;
mod state;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deskrelay_server=info".parse()?),
        )
        .init();

    let server_config = ServerConfig::from_env()?;
    let state = Arc::new(AppState::new(&server_config)?);

    let app = Router::new()
        .route("/", get(handlers::root))
        // Ollama proxies
        .route("/generate", post(handlers::generate))
        .route("/embeddings", post(handlers::embeddings))
        // Support retrieval
        .route("/train-support", post(handlers::train_support))
        .route("/get-similar-cases", post(handlers::get_similar_cases))
        .route("/order-status/{order_id}", get(handlers::order_status))
        .with_state(state);

    info!("Starting server on http://{}", server_config.addr);
    let listener = tokio::net::TcpListener::bind(server_config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
    }
}
