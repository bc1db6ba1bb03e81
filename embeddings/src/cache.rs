//! In-memory embedding cache.
//!
//! Caching is memory-only on purpose: the service rebuilds its index on every
//! start, so cached vectors have nothing to outlive.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::Embedding;
use crate::error::Result;
use crate::provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};

/// Cache entry for an embedding.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The embedding vector.
    embedding: Embedding,

    /// Insertion counter used for eviction ordering.
    inserted_at: u64,
}

/// Cache for embeddings to avoid redundant backend calls.
pub struct EmbeddingCache {
    /// In-memory cache keyed by text+model hash.
    cache: Arc<RwLock<HashMap<String, CacheEntry>>>,

    /// Monotonic insertion counter.
    counter: Arc<RwLock<u64>>,

    /// Maximum cache size.
    max_entries: usize,
}

impl EmbeddingCache {
    /// Create a new in-memory cache.
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            counter: Arc::new(RwLock::new(0)),
            max_entries,
        }
    }

    /// Compute a hash for cache lookup.
    fn hash_key(text: &str, model: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        model.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }

    /// Get an embedding from the cache.
    pub async fn get(&self, text: &str, model: &str) -> Option<Embedding> {
        let key = Self::hash_key(text, model);
        let cache = self.cache.read().await;
        cache.get(&key).map(|e| e.embedding.clone())
    }

    /// Put an embedding in the cache.
    pub async fn put(&self, text: &str, model: &str, embedding: Embedding) {
        let key = Self::hash_key(text, model);

        let inserted_at = {
            let mut counter = self.counter.write().await;
            *counter += 1;
            *counter
        };

        let mut cache = self.cache.write().await;

        // Evict the oldest entry once at capacity, unless this insert only
        // overwrites an existing key
        if cache.len() >= self.max_entries
            && !cache.contains_key(&key)
            && let Some(oldest_key) = cache
                .iter()
                .min_by_key(|(_, v)| v.inserted_at)
                .map(|(k, _)| k.clone())
        {
            cache.remove(&oldest_key);
        }

        cache.insert(
            key,
            CacheEntry {
                embedding,
                inserted_at,
            },
        );
        debug!("Cached embedding for text (model: {model})");
    }

    /// Check if an embedding is cached.
    pub async fn contains(&self, text: &str, model: &str) -> bool {
        let key = Self::hash_key(text, model);
        self.cache.read().await.contains_key(&key)
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    /// Whether the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }

    /// Clear the entire cache.
    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }
}

/// A provider wrapper that serves repeated texts from the cache.
pub struct CachedProvider<P> {
    provider: P,
    cache: EmbeddingCache,
}

impl<P> CachedProvider<P>
where
    P: EmbeddingProvider,
{
    /// Create a new cached provider.
    pub fn new(provider: P, cache: EmbeddingCache) -> Self {
        Self { provider, cache }
    }

    /// Get the underlying cache.
    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }
}

#[async_trait]
impl<P> EmbeddingProvider for CachedProvider<P>
where
    P: EmbeddingProvider,
{
    fn name(&self) -> &str {
        self.provider.name()
    }

    fn default_model(&self) -> &str {
        self.provider.default_model()
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string());

        if let Some(embedding) = self.cache.get(&request.text, &model).await {
            debug!("Cache hit for embedding");
            let dimension = embedding.len();
            return Ok(EmbeddingResponse {
                embedding,
                model,
                dimension,
            });
        }

        let response = self.provider.embed(request.clone()).await?;
        self.cache
            .put(&request.text, &model, response.embedding.clone())
            .await;

        Ok(response)
    }
}
