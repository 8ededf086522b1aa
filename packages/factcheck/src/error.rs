//! Typed errors for the fact-check pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during a verification operation.
#[derive(Debug, Error)]
pub enum FactCheckError {
    /// Knowledge source lookup failed
    #[error("knowledge source error: {0}")]
    Source(#[from] SourceError),

    /// Generation backend unavailable or failed
    #[error("generation error: {0}")]
    Generation(String),

    /// JSON encoding error (stream `final` payload)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from external knowledge source clients.
///
/// `NotFound` and `RateLimited` are deliberately distinct so callers can
/// tell "no such subject" apart from "try later".
#[derive(Debug, Error)]
pub enum SourceError {
    /// Subject absent, or resolved entity failed the identity check
    #[error("subject not found: {subject}")]
    NotFound { subject: String },

    /// Upstream source throttled the request
    #[error("rate limit exceeded")]
    RateLimited,

    /// Network failure or non-success status talking to the source
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response arrived but could not be interpreted
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl SourceError {
    /// True for the recoverable "subject missing" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, FactCheckError>;

/// Result type alias for knowledge source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable_from_rate_limited() {
        let not_found = SourceError::NotFound {
            subject: "Nobody".into(),
        };
        assert!(not_found.is_not_found());
        assert!(!SourceError::RateLimited.is_not_found());
    }

    #[test]
    fn source_error_converts_into_fact_check_error() {
        let err: FactCheckError = SourceError::RateLimited.into();
        assert!(matches!(err, FactCheckError::Source(SourceError::RateLimited)));
    }
}
