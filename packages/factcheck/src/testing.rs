//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pipeline without
//! making real LLM or network calls.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures::StreamExt;

use crate::error::{FactCheckError, Result, SourceError, SourceResult};
use crate::traits::generator::{FragmentStream, Generator};
use crate::traits::knowledge::{EntitySource, KnowledgeSource, QuoteSource};
use crate::types::context::ReferenceContext;

/// Failure behavior shared by the source mocks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum FailureMode {
    #[default]
    None,
    RateLimited,
    Transport,
}

impl FailureMode {
    fn check(self) -> SourceResult<()> {
        match self {
            FailureMode::None => Ok(()),
            FailureMode::RateLimited => Err(SourceError::RateLimited),
            FailureMode::Transport => Err(SourceError::Transport(Box::new(
                std::io::Error::other("mock transport failure"),
            ))),
        }
    }
}

/// A mock summary source for testing.
///
/// Returns predefined contexts keyed by locale and title; anything else
/// is `NotFound`. Records every lookup for assertions.
#[derive(Default)]
pub struct MockKnowledgeSource {
    /// Predefined contexts by (locale, title)
    summaries: Arc<RwLock<HashMap<(String, String), ReferenceContext>>>,

    /// Failure behavior applied before any lookup
    failure: FailureMode,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockKnowledgeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined context for a locale and title.
    pub fn with_summary(
        self,
        locale: impl Into<String>,
        title: impl Into<String>,
        context: ReferenceContext,
    ) -> Self {
        self.summaries
            .write()
            .unwrap()
            .insert((locale.into(), title.into()), context);
        self
    }

    /// Make every lookup fail with `RateLimited`.
    pub fn rate_limited(mut self) -> Self {
        self.failure = FailureMode::RateLimited;
        self
    }

    /// Make every lookup fail with a transport error.
    pub fn failing(mut self) -> Self {
        self.failure = FailureMode::Transport;
        self
    }

    /// All (locale, title) lookups made against this mock.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl KnowledgeSource for MockKnowledgeSource {
    async fn summary(&self, locale: &str, title: &str) -> SourceResult<ReferenceContext> {
        self.calls
            .write()
            .unwrap()
            .push((locale.to_string(), title.to_string()));
        self.failure.check()?;
        self.summaries
            .read()
            .unwrap()
            .get(&(locale.to_string(), title.to_string()))
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                subject: title.to_string(),
            })
    }
}

/// A mock entity source for testing.
///
/// Entities registered with [`with_human`](Self::with_human) pass the
/// identity check; everything else is a non-human entity.
#[derive(Default)]
pub struct MockEntitySource {
    humans: Arc<RwLock<HashSet<String>>>,
    citizenships: Arc<RwLock<HashMap<String, String>>>,
    failure: FailureMode,
}

impl MockEntitySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity id as a person.
    pub fn with_human(self, entity_id: impl Into<String>) -> Self {
        self.humans.write().unwrap().insert(entity_id.into());
        self
    }

    /// Add a citizenship label for an entity id.
    pub fn with_citizenship(
        self,
        entity_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.citizenships
            .write()
            .unwrap()
            .insert(entity_id.into(), label.into());
        self
    }

    /// Make every lookup fail with a transport error.
    pub fn failing(mut self) -> Self {
        self.failure = FailureMode::Transport;
        self
    }
}

#[async_trait]
impl EntitySource for MockEntitySource {
    async fn is_human(&self, entity_id: &str) -> SourceResult<bool> {
        self.failure.check()?;
        Ok(self.humans.read().unwrap().contains(entity_id))
    }

    async fn citizenship_label(
        &self,
        entity_id: &str,
        _preferred_lang: &str,
        _fallback_lang: &str,
    ) -> SourceResult<Option<String>> {
        self.failure.check()?;
        Ok(self.citizenships.read().unwrap().get(entity_id).cloned())
    }
}

/// A mock quote source for testing.
///
/// Unknown pages yield an empty list, matching the production behavior for
/// missing quotation pages.
#[derive(Default)]
pub struct MockQuoteSource {
    quotes: Arc<RwLock<HashMap<(String, String), Vec<String>>>>,
    failure: FailureMode,
}

impl MockQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add predefined quotes for a locale and title.
    pub fn with_quotes(
        self,
        locale: impl Into<String>,
        title: impl Into<String>,
        quotes: Vec<String>,
    ) -> Self {
        self.quotes
            .write()
            .unwrap()
            .insert((locale.into(), title.into()), quotes);
        self
    }

    /// Make every lookup fail with a transport error.
    pub fn failing(mut self) -> Self {
        self.failure = FailureMode::Transport;
        self
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn quotes(&self, locale: &str, title: &str) -> SourceResult<Vec<String>> {
        self.failure.check()?;
        Ok(self
            .quotes
            .read()
            .unwrap()
            .get(&(locale.to_string(), title.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// A mock generator for testing.
///
/// The blocking path returns a fixed response; the streaming path yields
/// the configured fragments in order. Records every prompt for assertions.
pub struct MockGenerator {
    response: String,
    fragments: Vec<String>,
    fail: bool,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            response: "VERIFICATION: UNVERIFIABLE\nCONFIDENCE: 0.5\nEXPLANATION: Mock response"
                .to_string(),
            fragments: Vec::new(),
            fail: false,
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blocking response.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    /// Set the fragments yielded by the streaming path.
    pub fn with_fragments(mut self, fragments: Vec<String>) -> Self {
        self.fragments = fragments;
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// All prompts passed to this mock.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, _model: &str, prompt: &str) -> Result<String> {
        self.prompts.write().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(FactCheckError::Generation("mock generation failure".to_string()));
        }
        Ok(self.response.clone())
    }

    async fn generate_stream(&self, _model: &str, prompt: &str) -> Result<FragmentStream> {
        self.prompts.write().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(FactCheckError::Generation("mock generation failure".to_string()));
        }
        let fragments = if self.fragments.is_empty() {
            vec![self.response.clone()]
        } else {
            self.fragments.clone()
        };
        Ok(futures::stream::iter(fragments.into_iter().map(Ok)).boxed())
    }
}
