//! Rate-limited knowledge source wrapper.
//!
//! Wraps any source implementation with rate limiting using the governor
//! crate. A rejected permit surfaces as `SourceError::RateLimited` rather
//! than waiting, so callers can tell "try later" apart from "not found"
//! and nothing retries in a tight loop.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::{SourceError, SourceResult};
use crate::traits::knowledge::{EntitySource, KnowledgeSource, QuoteSource};
use crate::types::context::ReferenceContext;

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A source wrapper that enforces rate limits.
pub struct RateLimited<S> {
    inner: S,
    limiter: Arc<DirectRateLimiter>,
}

impl<S> RateLimited<S> {
    /// Create a rate-limited wrapper allowing `per_minute` requests per minute.
    pub fn per_minute(inner: S, per_minute: u32) -> Self {
        let quota =
            Quota::per_minute(NonZeroU32::new(per_minute).expect("per_minute must be > 0"));
        Self {
            inner,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Create with a custom quota.
    pub fn with_quota(inner: S, quota: Quota) -> Self {
        Self {
            inner,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    fn permit(&self) -> SourceResult<()> {
        self.limiter.check().map_err(|_| SourceError::RateLimited)
    }
}

#[async_trait]
impl<S: KnowledgeSource> KnowledgeSource for RateLimited<S> {
    async fn summary(&self, locale: &str, title: &str) -> SourceResult<ReferenceContext> {
        self.permit()?;
        self.inner.summary(locale, title).await
    }
}

#[async_trait]
impl<S: EntitySource> EntitySource for RateLimited<S> {
    async fn is_human(&self, entity_id: &str) -> SourceResult<bool> {
        self.permit()?;
        self.inner.is_human(entity_id).await
    }

    async fn citizenship_label(
        &self,
        entity_id: &str,
        preferred_lang: &str,
        fallback_lang: &str,
    ) -> SourceResult<Option<String>> {
        self.permit()?;
        self.inner
            .citizenship_label(entity_id, preferred_lang, fallback_lang)
            .await
    }
}

#[async_trait]
impl<S: QuoteSource> QuoteSource for RateLimited<S> {
    async fn quotes(&self, locale: &str, title: &str) -> SourceResult<Vec<String>> {
        self.permit()?;
        self.inner.quotes(locale, title).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockKnowledgeSource;

    #[tokio::test]
    async fn rejects_over_quota_with_rate_limited() {
        let mock = MockKnowledgeSource::new()
            .with_summary("pl", "Kopernik", ReferenceContext::new("Kopernik"));
        let limited = RateLimited::per_minute(mock, 1);

        assert!(limited.summary("pl", "Kopernik").await.is_ok());
        let err = limited.summary("pl", "Kopernik").await.unwrap_err();
        assert!(matches!(err, SourceError::RateLimited));
    }

    #[tokio::test]
    async fn burst_quota_allows_consecutive_calls() {
        let mock = MockKnowledgeSource::new()
            .with_summary("pl", "Kopernik", ReferenceContext::new("Kopernik"));
        let quota = Quota::per_minute(NonZeroU32::new(10).unwrap());
        let limited = RateLimited::with_quota(mock, quota);

        for _ in 0..3 {
            assert!(limited.summary("pl", "Kopernik").await.is_ok());
        }
    }
}
