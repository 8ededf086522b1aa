//! Claim type - a candidate factual statement extracted from user input.

use serde::{Deserialize, Serialize};

/// A substring of the input message identified as potentially verifiable.
///
/// Claims are immutable once extracted and are consumed once by the
/// orchestrator; they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// The claim text, trimmed of surrounding whitespace.
    pub text: String,

    /// Byte offset of the claim within the original message, for
    /// traceability back to the input.
    pub offset: usize,
}

impl Claim {
    /// Create a new claim.
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }
}
