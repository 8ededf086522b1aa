//! Generator trait for text-generation backends.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;

/// A stream of incremental text fragments from a generation backend.
///
/// Fragments are non-overlapping and order-preserving; the stream ends when
/// the backend signals completion. A mid-stream transport failure surfaces
/// as an `Err` item.
pub type FragmentStream = BoxStream<'static, Result<String>>;

/// Text-generation backend.
///
/// Implementations wrap a specific backend (Ollama in production, mocks in
/// tests) and handle its wire protocol.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a complete response for the prompt (blocking path).
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;

    /// Generate a response as a stream of incremental fragments.
    async fn generate_stream(&self, model: &str, prompt: &str) -> Result<FragmentStream>;
}
