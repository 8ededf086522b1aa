//! Wikidata entity-attribute client.
//!
//! Validates entity identity (instance-of human) and resolves best-ranked
//! attribute claims such as citizenship.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{SourceError, SourceResult};
use crate::traits::knowledge::EntitySource;

const DEFAULT_BASE_URL: &str = "https://www.wikidata.org/wiki/Special:EntityData";
const USER_AGENT: &str = "factcheck/0.1 (contact: info@factcheck.app)";

/// Wikidata property: instance of.
const INSTANCE_OF: &str = "P31";
/// Wikidata property: country of citizenship.
const CITIZENSHIP: &str = "P27";
/// Wikidata item: human.
const HUMAN_QID: &str = "Q5";

/// Client for the Wikidata EntityData JSON endpoint.
pub struct WikidataClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for WikidataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WikidataClient {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(15))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (tests point this at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn entity_json(&self, entity_id: &str) -> SourceResult<Value> {
        let url = format!("{}/{}.json", self.base_url, entity_id);
        debug!(url = %url, "Fetching Wikidata entity");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(entity_id = %entity_id, error = %e, "Wikidata request failed");
            SourceError::Transport(Box::new(e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(entity_id = %entity_id, status = %status, "Wikidata API error");
            return Err(SourceError::Transport(Box::new(std::io::Error::other(
                format!("HTTP {}", status),
            ))));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }

    fn claims<'a>(root: &'a Value, entity_id: &str, property: &str) -> Option<&'a Vec<Value>> {
        root.get("entities")?
            .get(entity_id)?
            .get("claims")?
            .get(property)?
            .as_array()
    }

    async fn entity_label(
        &self,
        entity_id: &str,
        preferred_lang: &str,
        fallback_lang: &str,
    ) -> SourceResult<Option<String>> {
        let root = self.entity_json(entity_id).await?;
        let labels = root
            .get("entities")
            .and_then(|e| e.get(entity_id))
            .and_then(|e| e.get("labels"));

        let label = labels
            .and_then(|l| l.get(preferred_lang))
            .and_then(|l| l.get("value"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                labels
                    .and_then(|l| l.get(fallback_lang))
                    .and_then(|l| l.get("value"))
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            });

        Ok(label.map(String::from))
    }
}

/// Pick the best-ranked claim's target entity id.
///
/// A preferred-rank claim wins outright; otherwise the first normal-rank
/// claim; otherwise the first claim of any rank.
pub(crate) fn select_best_claim_id(claims: &[Value]) -> Option<String> {
    let mut normal = None;
    let mut fallback = None;

    for claim in claims {
        let entity_id = claim
            .pointer("/mainsnak/datavalue/value/id")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        let Some(entity_id) = entity_id else {
            continue;
        };

        let rank = claim.get("rank").and_then(Value::as_str).unwrap_or("normal");
        if rank.eq_ignore_ascii_case("preferred") {
            return Some(entity_id.to_string());
        }
        if rank.eq_ignore_ascii_case("normal") && normal.is_none() {
            normal = Some(entity_id.to_string());
        }
        if fallback.is_none() {
            fallback = Some(entity_id.to_string());
        }
    }

    normal.or(fallback)
}

#[async_trait]
impl EntitySource for WikidataClient {
    async fn is_human(&self, entity_id: &str) -> SourceResult<bool> {
        if entity_id.is_empty() {
            return Ok(false);
        }
        let root = self.entity_json(entity_id).await?;
        let Some(claims) = Self::claims(&root, entity_id, INSTANCE_OF) else {
            return Ok(false);
        };

        let human = claims.iter().any(|claim| {
            claim
                .pointer("/mainsnak/datavalue/value/id")
                .and_then(Value::as_str)
                == Some(HUMAN_QID)
        });
        Ok(human)
    }

    async fn citizenship_label(
        &self,
        entity_id: &str,
        preferred_lang: &str,
        fallback_lang: &str,
    ) -> SourceResult<Option<String>> {
        if entity_id.is_empty() {
            return Ok(None);
        }
        let root = self.entity_json(entity_id).await?;
        let Some(claims) = Self::claims(&root, entity_id, CITIZENSHIP) else {
            return Ok(None);
        };

        let Some(country_id) = select_best_claim_id(claims) else {
            return Ok(None);
        };
        self.entity_label(&country_id, preferred_lang, fallback_lang)
            .await
    }
}
