//! Configuration for the fact-check pipeline.

use std::time::Duration;

/// Configuration for the fact-check pipeline.
///
/// The claim keyword set and stop words default to Polish but are fully
/// configurable; multilingual claim detection is a deployment choice, not
/// a hard-coded one.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Generation model name.
    pub model: String,

    /// Primary locale tried first for knowledge-source lookups.
    pub primary_locale: String,

    /// Fallback locale tried when the primary lookup or identity check fails.
    pub fallback_locale: String,

    /// Keywords that mark a sentence as a candidate factual claim
    /// (matched case-insensitively, alongside 3-4 digit year runs).
    pub claim_keywords: Vec<String>,

    /// Common words excluded when deriving lookup keywords from a claim.
    pub stop_words: Vec<String>,

    /// Minimum trimmed length for a sentence to count as a claim.
    pub min_claim_length: usize,

    /// Streaming flush threshold in characters.
    pub flush_threshold: usize,

    /// Maximum quotes attached to a prompt per subject.
    pub max_quotes: usize,

    /// Upper wall-clock bound for one streaming verification.
    pub stream_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: "llama3.2:3b".to_string(),
            primary_locale: "pl".to_string(),
            fallback_locale: "en".to_string(),
            claim_keywords: [
                "urodzony", "zmarl", "prezydent", "krol", "wojna", "bitwa", "odkrycie",
                "wynalazek", "nagroda",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            stop_words: [
                "był", "jest", "była", "było", "byli", "oraz", "dla", "tego", "który", "która",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            min_claim_length: 20,
            flush_threshold: 24,
            max_quotes: 5,
            stream_timeout: Duration::from_secs(180),
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generation model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set primary and fallback locales.
    pub fn with_locales(
        mut self,
        primary: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        self.primary_locale = primary.into();
        self.fallback_locale = fallback.into();
        self
    }

    /// Replace the claim keyword set.
    pub fn with_claim_keywords(
        mut self,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.claim_keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }

    /// Replace the stop word set.
    pub fn with_stop_words(
        mut self,
        words: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.stop_words = words.into_iter().map(|w| w.into()).collect();
        self
    }

    /// Set the streaming flush threshold.
    pub fn with_flush_threshold(mut self, threshold: usize) -> Self {
        self.flush_threshold = threshold;
        self
    }

    /// Set the streaming timeout.
    pub fn with_stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = timeout;
        self
    }
}
