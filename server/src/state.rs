//! Shared application state.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use deskrelay_embeddings::{CachedProvider, EmbeddingCache};
use deskrelay_ollama::{OllamaClient, OllamaConfig};
use deskrelay_orders::SimulatedOrders;
use deskrelay_support::SupportEngine;

use crate::config::ServerConfig;

/// Retrieval queries repeat often; cache that many embeddings before evicting.
const EMBEDDING_CACHE_ENTRIES: usize = 1024;

/// State shared across request handlers.
pub struct AppState {
    /// Client for the local Ollama backend.
    pub ollama: Arc<OllamaClient>,

    /// Support-case retrieval engine.
    pub engine: SupportEngine,
}

impl AppState {
    /// Wire up the backend client, order store, and retrieval engine.
    ///
    /// The engine sees the Ollama client through an embedding cache, so
    /// repeated queries skip the backend round trip.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let ollama = Arc::new(OllamaClient::new(OllamaConfig::from_env())?);
        info!("Seeding {} simulated orders", config.seed_orders);
        let orders = Arc::new(SimulatedOrders::seeded(config.seed_orders));

        let provider = CachedProvider::new(
            ollama.clone(),
            EmbeddingCache::new(EMBEDDING_CACHE_ENTRIES),
        );
        let engine = SupportEngine::new(Arc::new(provider), orders);

        Ok(Self { ollama, engine })
    }
}
