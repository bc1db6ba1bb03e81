//! Tunables for the support engine.

use crate::index::DEFAULT_THRESHOLD;

/// Configuration for [`crate::SupportEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct SupportConfig {
    /// Minimum cosine similarity for a match to count as good.
    pub similarity_threshold: f32,
    /// Result count used when a query does not request one.
    pub default_top_k: usize,
    /// Upper bound on requested result counts.
    pub max_top_k: usize,
    /// Whether query text is normalized before embedding.
    pub preprocess_text: bool,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_THRESHOLD,
            default_top_k: 3,
            max_top_k: 5,
            preprocess_text: true,
        }
    }
}

impl SupportConfig {
    /// Clamp a requested result count to `1..=max_top_k`, substituting the
    /// default when absent.
    pub fn clamp_top_k(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_top_k)
            .clamp(1, self.max_top_k)
    }
}
