//! Similarity index over trained support cases.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use tracing::debug;

use deskrelay_embeddings::{Embedding, cosine_similarity, normalize};

use crate::error::{Result, SupportError};
use crate::model::SupportCase;
use crate::text;

/// Default minimum similarity for a case to count as a good match.
pub const DEFAULT_THRESHOLD: f32 = 0.75;

/// In-memory similarity index.
///
/// `cases[i]` and `embeddings[i]` are positionally paired for the lifetime of
/// the index; insertion order is the only ordering guarantee. Every stored
/// embedding is unit L2 norm. There is no removal API: entries live until
/// [`CaseIndex::clear`].
pub struct CaseIndex {
    cases: Vec<SupportCase>,
    embeddings: Vec<Embedding>,
    threshold: f32,
}

impl CaseIndex {
    /// Create an empty index with the default threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }

    /// Create an empty index with a custom match threshold.
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            cases: Vec::new(),
            embeddings: Vec::new(),
            threshold,
        }
    }

    /// The match threshold in effect.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Change the match threshold for all subsequent queries.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Number of indexed cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the index holds no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Dimensionality of the stored embeddings, `None` while empty.
    pub fn dimension(&self) -> Option<usize> {
        self.embeddings.first().map(Vec::len)
    }

    /// Get a stored case by index position.
    pub fn case(&self, position: usize) -> Option<&SupportCase> {
        self.cases.get(position)
    }

    /// Append cases with their raw embeddings.
    ///
    /// Each embedding is normalized to unit length (zero-norm vectors are
    /// rejected, never turned into NaN) and each question is normalized
    /// through the text normalizer. The whole batch is validated before
    /// anything is appended, so a failed call leaves the index untouched.
    pub fn add_cases(&mut self, entries: Vec<(SupportCase, Embedding)>) -> Result<()> {
        let expected = self
            .dimension()
            .or_else(|| entries.first().map(|(_, e)| e.len()));

        let mut staged = Vec::with_capacity(entries.len());
        for (mut case, mut embedding) in entries {
            if let Some(dim) = expected
                && embedding.len() != dim
            {
                return Err(SupportError::DimensionMismatch {
                    expected: dim,
                    actual: embedding.len(),
                });
            }
            normalize(&mut embedding)?;
            case.question = text::normalize(&case.question);
            staged.push((case, embedding));
        }

        for (case, embedding) in staged {
            self.cases.push(case);
            self.embeddings.push(embedding);
        }

        debug!("Index now holds {} cases", self.cases.len());
        Ok(())
    }

    /// Find the `top_k` best matches for a raw query embedding.
    ///
    /// Entries with similarity at or above the threshold are preferred; when
    /// none qualifies, the best-scoring entries are returned anyway so a
    /// non-empty index never produces an empty answer. Results are sorted
    /// descending by similarity; ties keep insertion order.
    pub fn query(&self, raw_query: &[f32], top_k: usize) -> Result<Vec<(usize, f32)>> {
        if self.cases.is_empty() {
            return Err(SupportError::EmptyIndex);
        }
        if let Some(dim) = self.dimension()
            && raw_query.len() != dim
        {
            return Err(SupportError::DimensionMismatch {
                expected: dim,
                actual: raw_query.len(),
            });
        }

        let mut query = raw_query.to_vec();
        normalize(&mut query)?;

        let mut scores = Vec::with_capacity(self.embeddings.len());
        for stored in &self.embeddings {
            scores.push(cosine_similarity(&query, stored)?);
        }

        let mut selected: Vec<usize> = (0..scores.len())
            .filter(|&i| scores[i] >= self.threshold)
            .collect();
        if selected.is_empty() {
            // Threshold fallback: surface the closest guesses instead of
            // returning nothing.
            debug!("No case met threshold {}, falling back to top-k", self.threshold);
            selected = (0..scores.len()).collect();
        }

        selected.sort_by_key(|&i| Reverse(OrderedFloat(scores[i])));
        selected.truncate(top_k);

        Ok(selected.into_iter().map(|i| (i, scores[i])).collect())
    }

    /// Drop every stored case and embedding.
    pub fn clear(&mut self) {
        self.cases.clear();
        self.embeddings.clear();
    }
}

impl Default for CaseIndex {
    fn default() -> Self {
        Self::new()
    }
}
