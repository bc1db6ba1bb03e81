//! # Ollama client
//!
//! HTTP client for a locally running Ollama server. It covers the two
//! endpoints the relay consumes:
//!
//! - `POST /api/embeddings` for embedding generation
//! - `POST /api/generate` for text generation (newline-delimited JSON stream,
//!   concatenated until the final `done` chunk)
//!
//! The client implements [`deskrelay_embeddings::EmbeddingProvider`], so the
//! retrieval engine can use it directly as its embedding backend.

pub mod client;
pub mod error;

pub use client::{OllamaClient, OllamaConfig};
pub use error::{OllamaError, Result};
