//! Generator implementation backed by a local Ollama server.

use async_trait::async_trait;
use futures::StreamExt;
use ollama_client::OllamaClient;

use crate::error::{FactCheckError, Result};
use crate::traits::generator::{FragmentStream, Generator};

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        self.generate_with_model(model, prompt)
            .await
            .map_err(|e| FactCheckError::Generation(e.to_string()))
    }

    async fn generate_stream(&self, model: &str, prompt: &str) -> Result<FragmentStream> {
        let stream = OllamaClient::generate_stream(self, model, prompt)
            .await
            .map_err(|e| FactCheckError::Generation(e.to_string()))?;

        // The done marker may carry an empty terminal fragment; drop empties
        // so consumers only see real text.
        let fragments = stream.filter_map(|item| async move {
            match item {
                Ok(chunk) if chunk.response.is_empty() => None,
                Ok(chunk) => Some(Ok(chunk.response)),
                Err(e) => Some(Err(FactCheckError::Generation(e.to_string()))),
            }
        });

        Ok(Box::pin(fragments))
    }
}
