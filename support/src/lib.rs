//! # Support retrieval
//!
//! Similarity-based retrieval over trained customer-support cases. A query is
//! normalized, embedded through the backend provider, and matched against the
//! in-memory case index by cosine similarity with a confidence-tiered
//! threshold policy. Matches in order-status categories are enriched with
//! live order details pulled from the order store.
//!
//! ## Architecture
//!
//! ```text
//! query text ──► normalize ──► augment (order id) ──► embed
//!                                                       │
//!                                                       ▼
//!                 CaseIndex (threshold + top-k fallback) ──► classify
//!                                                       │
//!                                                       ▼
//!                 enrich (order details, email summary) ──► SearchOutcome
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod index;
pub mod model;
pub mod template;
pub mod text;

pub use config::SupportConfig;
pub use engine::SupportEngine;
pub use error::{Result, SupportError};
pub use index::CaseIndex;
pub use model::{Confidence, SearchOutcome, SimilarityResult, SupportCase};
