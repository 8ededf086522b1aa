//! Context resolution with locale and identity fallback.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cache::TtlCache;
use crate::error::{SourceError, SourceResult};
use crate::traits::knowledge::{EntitySource, KnowledgeSource};
use crate::types::context::ReferenceContext;

/// Facts rarely change; cache resolved contexts for a day.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Result of resolving a subject name.
///
/// A missing subject is an expected, common outcome and is modeled as a
/// variant rather than an error; error propagation is reserved for
/// transport and rate-limit failures.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Subject resolved and identity-validated.
    Found(ReferenceContext),
    /// Subject absent or failed identity validation in all locales.
    NotFound,
}

impl Resolution {
    /// The context, if any.
    pub fn context(&self) -> Option<&ReferenceContext> {
        match self {
            Resolution::Found(context) => Some(context),
            Resolution::NotFound => None,
        }
    }
}

/// Resolves the best-available reference context for a subject.
///
/// Tries the primary locale then the fallback locale, validating identity
/// on each success. An identity failure in the primary locale does not end
/// the search: different locale editions may link to differently typed
/// entities for ambiguous names, so the fallback is always attempted before
/// concluding `NotFound`.
pub struct ContextResolver {
    summaries: Arc<dyn KnowledgeSource>,
    entities: Arc<dyn EntitySource>,
    primary_locale: String,
    fallback_locale: String,
    cache: TtlCache<(String, String), ReferenceContext>,
}

impl ContextResolver {
    /// Create a resolver over the given sources and locales.
    pub fn new(
        summaries: Arc<dyn KnowledgeSource>,
        entities: Arc<dyn EntitySource>,
        primary_locale: impl Into<String>,
        fallback_locale: impl Into<String>,
    ) -> Self {
        Self {
            summaries,
            entities,
            primary_locale: primary_locale.into(),
            fallback_locale: fallback_locale.into(),
            cache: TtlCache::new(DEFAULT_CACHE_TTL),
        }
    }

    /// Override the cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = TtlCache::new(ttl);
        self
    }

    /// Resolve reference context for a subject name.
    ///
    /// Only rate-limit rejections and fallback-locale transport failures
    /// surface as errors; everything else degrades to `NotFound`.
    pub async fn resolve(&self, subject: &str) -> SourceResult<Resolution> {
        info!(subject = %subject, "Resolving reference context");

        let mut last_error: Option<SourceError> = None;

        for locale in [&self.primary_locale, &self.fallback_locale] {
            let key = (subject.to_string(), locale.clone());
            if let Some(context) = self.cache.get(&key) {
                debug!(subject = %subject, locale = %locale, "Cache hit");
                return Ok(Resolution::Found(context));
            }

            match self.lookup_validated(locale, subject).await {
                Ok(context) => {
                    self.cache.insert(key, context.clone());
                    return Ok(Resolution::Found(context));
                }
                // Throttled: do not hammer the fallback locale against the
                // same limiter; surface distinctly so callers can back off.
                Err(SourceError::RateLimited) => return Err(SourceError::RateLimited),
                Err(e) => {
                    debug!(subject = %subject, locale = %locale, error = %e, "Locale lookup failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !e.is_not_found() => Err(e),
            _ => Ok(Resolution::NotFound),
        }
    }

    /// Summary lookup plus identity validation for one locale.
    async fn lookup_validated(
        &self,
        locale: &str,
        subject: &str,
    ) -> SourceResult<ReferenceContext> {
        let context = self.summaries.summary(locale, subject).await?;

        let entity_id = context
            .entity_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SourceError::NotFound {
                subject: "Unknown".to_string(),
            })?;

        if !self.entities.is_human(entity_id).await? {
            debug!(subject = %subject, entity_id = %entity_id, "Entity is not a person");
            return Err(SourceError::NotFound {
                subject: "Not a person".to_string(),
            });
        }

        Ok(context)
    }

    /// Best-ranked nationality label for an entity, in the resolver's
    /// primary language with fallback.
    pub async fn nationality(&self, entity_id: &str) -> SourceResult<String> {
        let label = self
            .entities
            .citizenship_label(entity_id, &self.primary_locale, &self.fallback_locale)
            .await
            .unwrap_or_else(|e| {
                warn!(entity_id = %entity_id, error = %e, "Citizenship lookup failed");
                None
            });
        Ok(label.unwrap_or_else(|| "Unknown".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockEntitySource, MockKnowledgeSource};

    fn resolver(
        summaries: MockKnowledgeSource,
        entities: MockEntitySource,
    ) -> ContextResolver {
        ContextResolver::new(Arc::new(summaries), Arc::new(entities), "pl", "en")
    }

    #[tokio::test]
    async fn resolves_human_in_primary_locale() {
        let summaries = MockKnowledgeSource::new().with_summary(
            "pl",
            "Mikołaj Kopernik",
            ReferenceContext::new("Mikołaj Kopernik").with_entity_id("Q619"),
        );
        let entities = MockEntitySource::new().with_human("Q619");

        let resolution = resolver(summaries, entities)
            .resolve("Mikołaj Kopernik")
            .await
            .unwrap();
        assert_eq!(
            resolution.context().map(|c| c.title.as_str()),
            Some("Mikołaj Kopernik")
        );
    }

    #[tokio::test]
    async fn falls_back_when_primary_identity_check_fails() {
        // Primary locale links to a non-human entity; the fallback locale
        // links to a different entity that passes.
        let summaries = MockKnowledgeSource::new()
            .with_summary(
                "pl",
                "Mars",
                ReferenceContext::new("Mars (planeta)").with_entity_id("Q111"),
            )
            .with_summary(
                "en",
                "Mars",
                ReferenceContext::new("Mars (mythology)").with_entity_id("Q112"),
            );
        let entities = MockEntitySource::new().with_human("Q112");

        let resolution = resolver(summaries, entities).resolve("Mars").await.unwrap();
        assert_eq!(
            resolution.context().map(|c| c.title.as_str()),
            Some("Mars (mythology)")
        );
    }

    #[tokio::test]
    async fn not_found_when_both_locales_fail_identity() {
        let summaries = MockKnowledgeSource::new()
            .with_summary("pl", "Wisła", ReferenceContext::new("Wisła").with_entity_id("Q5K"))
            .with_summary("en", "Wisła", ReferenceContext::new("Vistula").with_entity_id("Q5K"));
        let entities = MockEntitySource::new();

        let resolution = resolver(summaries, entities).resolve("Wisła").await.unwrap();
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn missing_entity_id_counts_as_not_found() {
        let summaries = MockKnowledgeSource::new().with_summary(
            "pl",
            "Coś",
            ReferenceContext::new("Coś"),
        );
        let entities = MockEntitySource::new();

        let resolution = resolver(summaries, entities).resolve("Coś").await.unwrap();
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn rate_limited_surfaces_without_fallback_attempt() {
        let summaries = Arc::new(MockKnowledgeSource::new().rate_limited());
        let entities = Arc::new(MockEntitySource::new());
        let resolver =
            ContextResolver::new(summaries.clone(), entities, "pl", "en");

        let err = resolver.resolve("Ktoś").await.unwrap_err();
        assert!(matches!(err, SourceError::RateLimited));
        assert_eq!(summaries.calls().len(), 1);
    }

    #[tokio::test]
    async fn cache_hit_skips_upstream_calls() {
        let summaries = Arc::new(MockKnowledgeSource::new().with_summary(
            "pl",
            "Kopernik",
            ReferenceContext::new("Kopernik").with_entity_id("Q619"),
        ));
        let entities = Arc::new(MockEntitySource::new().with_human("Q619"));
        let resolver =
            ContextResolver::new(summaries.clone(), entities, "pl", "en");

        resolver.resolve("Kopernik").await.unwrap();
        resolver.resolve("Kopernik").await.unwrap();

        assert_eq!(summaries.calls().len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_in_both_locales_surfaces() {
        let summaries = MockKnowledgeSource::new().failing();
        let entities = MockEntitySource::new();

        let err = resolver(summaries, entities).resolve("X").await.unwrap_err();
        assert!(matches!(err, SourceError::Transport(_)));
    }

    #[tokio::test]
    async fn nationality_defaults_to_unknown() {
        let summaries = MockKnowledgeSource::new();
        let entities = MockEntitySource::new();

        let nationality = resolver(summaries, entities).nationality("Q619").await.unwrap();
        assert_eq!(nationality, "Unknown");
    }

    #[tokio::test]
    async fn nationality_prefers_configured_language() {
        let summaries = MockKnowledgeSource::new();
        let entities = MockEntitySource::new().with_citizenship("Q619", "Polska");

        let nationality = resolver(summaries, entities).nationality("Q619").await.unwrap();
        assert_eq!(nationality, "Polska");
    }
}
