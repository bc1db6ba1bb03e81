//! HTTP client for the Ollama API.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use tracing::{debug, info, warn};

use deskrelay_embeddings::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
};

use crate::error::{OllamaError, Result};

/// Default request timeout. The backend is blocking I/O with no caller-side
/// cancellation, so a bounded timeout is the only thing standing between a
/// stuck model and a hung request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Ollama client.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,

    /// Model used for text generation.
    pub llm_model: String,

    /// Model used for embeddings.
    pub embedding_model: String,

    /// Whether requests ask the backend to run on GPU.
    pub use_gpu: bool,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            llm_model: "mistral".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            use_gpu: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OllamaConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults: `OLLAMA_HOST`, `OLLAMA_PORT`, `LLM_MODEL`, `EMBEDDING_MODEL`,
    /// `DEFAULT_GPU`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("OLLAMA_PORT").unwrap_or_else(|_| "11434".to_string());

        Self {
            base_url: format!("http://{host}:{port}"),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            embedding_model: std::env::var("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            use_gpu: std::env::var("DEFAULT_GPU")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.use_gpu),
            timeout: defaults.timeout,
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for a locally running Ollama server.
pub struct OllamaClient {
    config: OllamaConfig,
    client: reqwest::Client,
}

/// One chunk of the newline-delimited `/api/generate` stream.
#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

/// Body of a successful `/api/embeddings` response.
#[derive(Debug, Deserialize)]
struct EmbeddingsBody {
    embedding: Embedding,
}

impl OllamaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        info!(
            "Ollama client ready: {} (llm: {}, embeddings: {}, gpu: {})",
            config.base_url, config.llm_model, config.embedding_model, config.use_gpu
        );

        Ok(Self { config, client })
    }

    /// The active configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Generate an embedding for a single text.
    pub async fn embed_text(&self, text: &str) -> Result<Embedding> {
        self.embed_with(text, &self.config.embedding_model, self.config.use_gpu)
            .await
    }

    async fn embed_with(&self, text: &str, model: &str, use_gpu: bool) -> Result<Embedding> {
        debug!("Requesting embedding with model: {model}");

        let payload = serde_json::json!({
            "model": model,
            "prompt": text,
            "options": { "gpu": use_gpu },
        });

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.config.base_url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::Unavailable(format!(
                "embeddings request failed with status {status}: {body}"
            )));
        }

        let body: EmbeddingsBody = response
            .json()
            .await
            .map_err(|e| OllamaError::MalformedResponse(e.to_string()))?;

        debug!("Received embedding with {} dimensions", body.embedding.len());
        Ok(body.embedding)
    }

    /// Generate text for the given prompt.
    ///
    /// The backend answers with a newline-delimited JSON stream; the fragments
    /// are concatenated until the chunk flagged `done` arrives. Lines that
    /// fail to parse are skipped with a warning, matching the tolerant
    /// behavior expected of a streaming reader.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with(prompt, self.config.use_gpu).await
    }

    /// Generate text with an explicit GPU flag, overriding the configured one.
    pub async fn generate_with(&self, prompt: &str, use_gpu: bool) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.config.llm_model,
            "prompt": prompt,
            "options": { "gpu": use_gpu },
        });

        let response = self
            .client
            .post(format!("{}/api/generate", self.config.base_url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::Unavailable(format!(
                "generate request failed with status {status}: {body}"
            )));
        }

        let mut generated = String::new();
        let mut buffer = String::new();
        let mut parsed_any = false;
        let mut saw_line = false;
        let mut done = false;

        let mut stream = response.bytes_stream();
        'outer: while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline) = buffer.find('\n') {
                let line: String = buffer.drain(..=newline).collect();
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                saw_line = true;

                match serde_json::from_str::<GenerateChunk>(line) {
                    Ok(part) => {
                        parsed_any = true;
                        generated.push_str(&part.response);
                        if part.done {
                            done = true;
                            break 'outer;
                        }
                    }
                    Err(_) => warn!("Could not parse generate chunk: {line}"),
                }
            }
        }

        // Trailing chunk without a newline terminator
        if !done {
            let line = buffer.trim();
            if !line.is_empty() {
                saw_line = true;
                if let Ok(part) = serde_json::from_str::<GenerateChunk>(line) {
                    parsed_any = true;
                    generated.push_str(&part.response);
                } else {
                    warn!("Could not parse generate chunk: {line}");
                }
            }
        }

        if saw_line && !parsed_any {
            return Err(OllamaError::MalformedResponse(
                "generate stream contained no parseable chunks".to_string(),
            ));
        }

        Ok(generated.trim().to_string())
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    fn default_model(&self) -> &str {
        &self.config.embedding_model
    }

    async fn embed(
        &self,
        request: EmbeddingRequest,
    ) -> deskrelay_embeddings::Result<EmbeddingResponse> {
        let model = request
            .model
            .unwrap_or_else(|| self.config.embedding_model.clone());
        let use_gpu = request.use_gpu.unwrap_or(self.config.use_gpu);

        let embedding = self
            .embed_with(&request.text, &model, use_gpu)
            .await
            .map_err(deskrelay_embeddings::EmbeddingError::from)?;

        let dimension = embedding.len();
        Ok(EmbeddingResponse {
            embedding,
            model,
            dimension,
        })
    }
}
