//! Knowledge source traits.
//!
//! Each external encyclopedic source is reached through one of these narrow
//! interfaces: summary-by-title lookup, entity-attribute lookup, and
//! quotation lookup.

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::context::ReferenceContext;

/// Summary-by-title lookup against an encyclopedic source.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Fetch the summary for `title` in the given locale edition.
    ///
    /// A missing article is `SourceError::NotFound`, not a transport error.
    async fn summary(&self, locale: &str, title: &str) -> SourceResult<ReferenceContext>;
}

/// Entity-attribute lookup against a structured-entity source.
///
/// Used for identity validation (is this entity a person?) and for
/// best-ranked attribute resolution such as citizenship.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// True if the entity's instance-of claims include the human type.
    async fn is_human(&self, entity_id: &str) -> SourceResult<bool>;

    /// Best-ranked citizenship label for the entity, resolved in the
    /// preferred language with a fallback language.
    async fn citizenship_label(
        &self,
        entity_id: &str,
        preferred_lang: &str,
        fallback_lang: &str,
    ) -> SourceResult<Option<String>>;
}

/// Quotation lookup against a quotation source.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Attributed quotes for `title` in the given locale edition.
    ///
    /// A missing page yields an empty list; only transport failures error.
    async fn quotes(&self, locale: &str, title: &str) -> SourceResult<Vec<String>>;
}
