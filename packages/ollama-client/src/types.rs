//! Wire types for the Ollama `/api/generate` endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `/api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name (e.g. "llama3.2:3b").
    pub model: String,
    /// The prompt to complete.
    pub prompt: String,
    /// Whether the response should be streamed as NDJSON fragments.
    pub stream: bool,
}

impl GenerateRequest {
    /// Create a blocking (non-streaming) request.
    pub fn blocking(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }

    /// Create a streaming request.
    pub fn streaming(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: true,
        }
    }
}

/// One NDJSON object from a generate response.
///
/// Blocking responses may still arrive as several of these objects on
/// separate lines; their `response` fields concatenate in arrival order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GenerateChunk {
    /// Incremental text fragment.
    #[serde(default)]
    pub response: String,

    /// Set on the terminal object of a response.
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_wire_shape() {
        let req = GenerateRequest::blocking("llama3.2:3b", "hello");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "llama3.2:3b");
        assert_eq!(json["prompt"], "hello");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn chunk_tolerates_missing_fields() {
        let chunk: GenerateChunk = serde_json::from_str("{}").unwrap();
        assert_eq!(chunk.response, "");
        assert!(!chunk.done);

        let chunk: GenerateChunk =
            serde_json::from_str(r#"{"response":"hi","done":true,"model":"x"}"#).unwrap();
        assert_eq!(chunk.response, "hi");
        assert!(chunk.done);
    }
}
