//! Verification outcome - the typed result of verifying one claim.

use serde::{Deserialize, Serialize};

/// Verification label assigned to a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationLabel {
    /// The claim has been verified as true
    Verified,
    /// The claim has been verified as false
    False,
    /// The claim is partially true but has inaccuracies
    Partial,
    /// The claim could not be verified due to lack of information
    Unverifiable,
}

/// The result of verifying one claim.
///
/// Label and confidence are always present; parse failures degrade to
/// `Unverifiable` with a default confidence rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// The original claim text.
    pub claim: String,

    /// Verification label.
    pub verification: VerificationLabel,

    /// Confidence in the label, in `[0.0, 1.0]`.
    pub confidence: f32,

    /// Model (or pipeline) explanation of the decision.
    pub explanation: String,

    /// Where the supporting context came from, if anywhere.
    #[serde(default)]
    pub source: Option<String>,
}

impl VerificationOutcome {
    /// Create an outcome with all fields.
    pub fn new(
        claim: impl Into<String>,
        verification: VerificationLabel,
        confidence: f32,
        explanation: impl Into<String>,
        source: Option<String>,
    ) -> Self {
        Self {
            claim: claim.into(),
            verification,
            confidence,
            explanation: explanation.into(),
            source,
        }
    }

    /// Degraded outcome used when a claim cannot be verified at all
    /// (extraction found nothing, or a per-claim failure was absorbed).
    pub fn unverifiable(claim: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
            verification: VerificationLabel::Unverifiable,
            confidence: 0.0,
            explanation: explanation.into(),
            source: None,
        }
    }
}
