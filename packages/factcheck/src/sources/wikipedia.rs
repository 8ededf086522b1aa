//! Wikipedia REST summary client.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::{SourceError, SourceResult};
use crate::traits::knowledge::KnowledgeSource;
use crate::types::context::ReferenceContext;

const DEFAULT_BASE_URL_TEMPLATE: &str = "https://{locale}.wikipedia.org/api/rest_v1";
const USER_AGENT: &str = "factcheck/0.1 (contact: info@factcheck.app)";

/// Client for the Wikipedia REST `/page/summary` endpoint.
///
/// The locale selects the language edition; word spaces in titles are
/// normalized to underscores per Wikipedia's title convention.
pub struct WikipediaClient {
    client: reqwest::Client,
    base_url_template: String,
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WikipediaClient {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(15))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url_template: DEFAULT_BASE_URL_TEMPLATE.to_string(),
        }
    }

    /// Override the base URL template. `{locale}` is substituted with the
    /// locale code; a template without the placeholder pins one endpoint,
    /// which tests use to point at a local server.
    pub fn with_base_url_template(mut self, template: impl Into<String>) -> Self {
        self.base_url_template = template.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self, locale: &str) -> String {
        self.base_url_template.replace("{locale}", locale)
    }
}

#[async_trait]
impl KnowledgeSource for WikipediaClient {
    async fn summary(&self, locale: &str, title: &str) -> SourceResult<ReferenceContext> {
        let url = format!(
            "{}/page/summary/{}",
            self.endpoint(locale),
            title.replace(' ', "_")
        );
        debug!(url = %url, title = %title, "Fetching Wikipedia summary");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(title = %title, error = %e, "Wikipedia request failed");
            SourceError::Transport(Box::new(e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(title = %title, locale = %locale, "Subject not found in Wikipedia");
            return Err(SourceError::NotFound {
                subject: title.to_string(),
            });
        }
        if !status.is_success() {
            warn!(title = %title, status = %status, "Wikipedia API error");
            return Err(SourceError::Transport(Box::new(std::io::Error::other(
                format!("HTTP {}", status),
            ))));
        }

        let context: ReferenceContext = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        debug!(title = %context.title, "Fetched Wikipedia summary");
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_substitutes_locale() {
        let client = WikipediaClient::new();
        assert_eq!(client.endpoint("pl"), "https://pl.wikipedia.org/api/rest_v1");
        assert_eq!(client.endpoint("en"), "https://en.wikipedia.org/api/rest_v1");
    }

    #[test]
    fn endpoint_template_without_placeholder_is_fixed() {
        let client = WikipediaClient::new().with_base_url_template("http://127.0.0.1:8080");
        assert_eq!(client.endpoint("pl"), "http://127.0.0.1:8080");
    }
}
