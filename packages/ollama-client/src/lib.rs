//! Pure Ollama REST API client
//!
//! A clean, minimal client for a local Ollama server with no domain-specific
//! logic. Supports blocking and streaming text generation over the
//! line-delimited JSON wire protocol of `/api/generate`.
//!
//! # Example
//!
//! ```rust,ignore
//! use ollama_client::OllamaClient;
//! use futures::StreamExt;
//!
//! let client = OllamaClient::new("http://localhost:11434");
//!
//! // Blocking generation
//! let text = client.generate("Why is the sky blue?").await?;
//!
//! // Streaming generation
//! let mut stream = client.generate_stream("llama3.2:3b", "Tell me a story").await?;
//! while let Some(chunk) = stream.next().await {
//!     print!("{}", chunk?.response);
//! }
//! ```

pub mod error;
pub mod streaming;
pub mod types;

pub use error::{OllamaError, Result};
pub use streaming::GenerateStream;
pub use types::{GenerateChunk, GenerateRequest};

use reqwest::Client;
use tracing::{debug, warn};

/// Default model used when none is specified.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Pure Ollama API client.
#[derive(Clone)]
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
    default_model: String,
}

impl OllamaClient {
    /// Create a new client for the given base URL (e.g. `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .connect_timeout(std::time::Duration::from_secs(30))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from environment variable `OLLAMA_BASE_URL`, defaulting to
    /// the standard local port.
    pub fn from_env() -> Self {
        let base_url = std::env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());
        Self::new(base_url)
    }

    /// Set the default model used by [`OllamaClient::generate`].
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the default model name.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Blocking generation using the default model.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let model = self.default_model.clone();
        self.generate_with_model(&model, prompt).await
    }

    /// Blocking generation.
    ///
    /// Sends `{model, prompt, stream: false}` and concatenates the `response`
    /// fields of every newline-delimited JSON object in the reply. Most
    /// backends answer with a single object, but multi-object replies are
    /// handled the same way.
    pub async fn generate_with_model(&self, model: &str, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();
        debug!(model = %model, "Ollama generate starting");

        let request = GenerateRequest::blocking(model, prompt);

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Ollama request failed");
                OllamaError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Ollama API error");
            return Err(OllamaError::Api(format!("Ollama API error: {}", error_text)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OllamaError::Network(e.to_string()))?;

        let text = concat_ndjson_response(&body)?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            "Ollama generate complete"
        );

        Ok(text)
    }

    /// Streaming generation.
    ///
    /// Sends `{model, prompt, stream: true}` and returns a stream of
    /// incremental [`GenerateChunk`] values. The stream ends at the first
    /// chunk carrying `done: true`.
    pub async fn generate_stream(&self, model: &str, prompt: &str) -> Result<GenerateStream> {
        debug!(model = %model, "Ollama streaming generate starting");

        let request = GenerateRequest::streaming(model, prompt);

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Ollama streaming request failed");
                OllamaError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Ollama streaming API error");
            return Err(OllamaError::Api(format!(
                "Ollama streaming API error: {}",
                error_text
            )));
        }

        Ok(GenerateStream::new(response.bytes_stream()))
    }
}

/// Concatenate the `response` fields of a newline-delimited JSON reply.
///
/// Malformed lines are skipped; a reply with no parseable object at all is a
/// parse error.
fn concat_ndjson_response(body: &str) -> Result<String> {
    let mut text = String::new();
    let mut parsed_any = false;

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<GenerateChunk>(line) {
            Ok(chunk) => {
                parsed_any = true;
                text.push_str(&chunk.response);
            }
            Err(e) => {
                debug!(error = %e, "Skipping malformed response line");
            }
        }
    }

    if !parsed_any {
        // Truncate on char boundaries; error pages are often multi-byte text.
        let preview: String = body.chars().take(200).collect();
        return Err(OllamaError::Parse(format!(
            "No parseable JSON object in response: {}",
            preview
        )));
    }

    Ok(text)
}
