//! # Embeddings
//!
//! This crate provides the embedding primitives for the deskrelay support
//! service: vector similarity math, L2 normalization, the provider seam for
//! the upstream embedding backend, and an in-memory embedding cache.
//!
//! ## Features
//!
//! - **Similarity**: Cosine similarity and dot product over dense vectors
//! - **Normalization**: L2 unit-norm scaling with explicit zero-norm errors
//! - **Providers**: `EmbeddingProvider` trait implemented by backend clients
//! - **Caching**: In-memory cache wrapper to avoid redundant backend calls

pub mod cache;
pub mod error;
pub mod provider;
pub mod similarity;

pub use cache::{CachedProvider, EmbeddingCache};
pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use similarity::{cosine_similarity, normalize, normalized};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;
