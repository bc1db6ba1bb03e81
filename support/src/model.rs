//! Core data model for support-case retrieval.

use serde::{Deserialize, Serialize};

use deskrelay_orders::Order;

/// A stored question/answer record used as a retrieval target.
///
/// Immutable once stored; the question is kept in normalized form, the answer
/// keeps its original form (enrichment rewrites a copy, never the stored
/// record).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportCase {
    pub question: String,
    pub answer: String,
    pub category: String,
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_priority() -> u32 {
    1
}

/// Discrete confidence tier derived from a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Similarity at or above this is high confidence.
    pub const HIGH_CUTOFF: f32 = 0.85;

    /// Similarity at or above this (and below high) is medium confidence.
    ///
    /// Numerically equal to the index's default match threshold, but the two
    /// are separate knobs: retuning the threshold must not move the tiers.
    pub const MEDIUM_CUTOFF: f32 = 0.75;

    /// Classify a raw similarity score.
    pub fn from_similarity(similarity: f32) -> Self {
        if similarity >= Self::HIGH_CUTOFF {
            Confidence::High
        } else if similarity >= Self::MEDIUM_CUTOFF {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// One ranked retrieval hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub case: SupportCase,
    /// Cosine similarity in [-1, 1].
    pub similarity: f32,
    pub confidence: Confidence,
}

/// Everything `find_similar` returns: the ranked, enriched results plus the
/// side metadata the service reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: Vec<SimilarityResult>,

    /// The text that was actually embedded (normalized, possibly augmented
    /// with order status).
    pub processed_query: String,

    /// Match threshold in effect for this query.
    pub threshold: f32,

    /// Total cases in the index at query time.
    pub total_cases: usize,

    /// Order matched from the query text, when one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,

    /// Confidence of the top result, `low` when there are no results.
    pub confidence: Confidence,
}
