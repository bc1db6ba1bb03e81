//! Retrieval engine tying together normalization, embedding, the case index,
//! and order-aware enrichment.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use deskrelay_embeddings::{Embedding, EmbeddingProvider, EmbeddingRequest};
use deskrelay_orders::{OrderLookup, StatusReport};

use crate::config::SupportConfig;
use crate::error::{Result, SupportError};
use crate::extract;
use crate::index::CaseIndex;
use crate::model::{Confidence, SearchOutcome, SimilarityResult, SupportCase};
use crate::template;
use crate::text;

/// Similarity-based support-case retrieval with live order enrichment.
///
/// The index is behind an async `RwLock`: queries take read locks, training
/// takes a write lock, and a whole batch of cases becomes visible atomically
/// or not at all.
pub struct SupportEngine {
    provider: Arc<dyn EmbeddingProvider>,
    orders: Arc<dyn OrderLookup>,
    index: RwLock<CaseIndex>,
    config: SupportConfig,
}

impl SupportEngine {
    /// Create an engine with default configuration.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, orders: Arc<dyn OrderLookup>) -> Self {
        Self::with_config(provider, orders, SupportConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(
        provider: Arc<dyn EmbeddingProvider>,
        orders: Arc<dyn OrderLookup>,
        config: SupportConfig,
    ) -> Self {
        Self {
            provider,
            orders,
            index: RwLock::new(CaseIndex::with_threshold(config.similarity_threshold)),
            config,
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &SupportConfig {
        &self.config
    }

    /// Number of trained cases.
    pub async fn case_count(&self) -> usize {
        self.index.read().await.len()
    }

    /// Train on cases, embedding each question through the backend.
    ///
    /// Returns the total case count after training.
    pub async fn train(&self, cases: Vec<SupportCase>, use_gpu: Option<bool>) -> Result<usize> {
        let requests: Vec<EmbeddingRequest> = cases
            .iter()
            .map(|case| {
                let question = if self.config.preprocess_text {
                    text::normalize(&case.question)
                } else {
                    case.question.clone()
                };
                let mut request = EmbeddingRequest::new(question);
                if let Some(gpu) = use_gpu {
                    request = request.with_gpu(gpu);
                }
                request
            })
            .collect();

        let responses = self.provider.embed_batch(requests).await?;
        let embeddings = responses.into_iter().map(|r| r.embedding).collect();
        self.train_with_embeddings(cases, embeddings).await
    }

    /// Train on cases paired with precomputed embeddings.
    pub async fn train_with_embeddings(
        &self,
        cases: Vec<SupportCase>,
        embeddings: Vec<Embedding>,
    ) -> Result<usize> {
        if cases.len() != embeddings.len() {
            return Err(SupportError::CaseCountMismatch {
                cases: cases.len(),
                embeddings: embeddings.len(),
            });
        }

        let entries: Vec<(SupportCase, Embedding)> =
            cases.into_iter().zip(embeddings).collect();
        let added = entries.len();

        let mut index = self.index.write().await;
        index.add_cases(entries)?;
        let total = index.len();
        drop(index);

        info!("Trained {added} support cases, {total} total");
        Ok(total)
    }

    /// Find the support cases most similar to `query_text`.
    ///
    /// Order-id and email tokens are detected on the raw query text before
    /// normalization strips the characters they depend on. A matched order
    /// biases the embedding toward order-status cases and drives the
    /// enrichment pass over the results.
    pub async fn find_similar(
        &self,
        query_text: &str,
        top_k: Option<usize>,
        use_gpu: Option<bool>,
    ) -> Result<SearchOutcome> {
        let normalized = if self.config.preprocess_text {
            text::normalize(query_text)
        } else {
            query_text.to_string()
        };

        let order = extract::extract_order_id(query_text)
            .and_then(|id| self.orders.order(&id));

        let processed_query = match &order {
            Some(order) => {
                debug!("Query references order {}", order.order_id);
                format!(
                    "{normalized} Orden: {} Estado: {}",
                    order.order_id, order.status
                )
            }
            None => normalized,
        };

        let mut request = EmbeddingRequest::new(processed_query.clone());
        if let Some(gpu) = use_gpu {
            request = request.with_gpu(gpu);
        }
        let embedding = self.provider.embed(request).await?.embedding;

        let top_k = self.config.clamp_top_k(top_k);
        let index = self.index.read().await;
        let hits = index.query(&embedding, top_k)?;
        let total_cases = index.len();
        let threshold = index.threshold();

        let mut results: Vec<SimilarityResult> = hits
            .into_iter()
            .filter_map(|(position, similarity)| {
                index.case(position).map(|case| SimilarityResult {
                    case: case.clone(),
                    similarity,
                    confidence: Confidence::from_similarity(similarity),
                })
            })
            .collect();
        drop(index);

        if let Some(order) = &order {
            for result in &mut results {
                if template::wants_order_details(&result.case.category) {
                    result.case.answer = template::fill_details(&result.case.answer, order);
                }
            }
        }

        if let Some(email) = extract::extract_email(query_text) {
            let customer_orders = self.orders.orders_for_email(&email);
            if !customer_orders.is_empty()
                && let Some(top) = results.first_mut()
            {
                top.case.answer =
                    template::append_order_summary(&top.case.answer, &customer_orders);
            }
        }

        let confidence = results
            .first()
            .map(|r| r.confidence)
            .unwrap_or(Confidence::Low);

        Ok(SearchOutcome {
            results,
            processed_query,
            threshold,
            total_cases,
            order,
            confidence,
        })
    }

    /// Status report for a single order, `None` when the id is unknown.
    pub fn order_status(&self, order_id: &str) -> Option<StatusReport> {
        self.orders.order(order_id).map(|o| o.status_report())
    }
}
