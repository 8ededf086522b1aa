//! Caller-facing verification request.

use serde::{Deserialize, Serialize};

/// A verification request from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckRequest {
    /// Free text containing the claims to verify.
    pub message: String,

    /// Subject name to resolve reference context for. When absent, lookup
    /// keywords are derived from each claim instead.
    #[serde(default)]
    pub subject_name: Option<String>,

    /// Optional caller-supplied context included verbatim in the prompt.
    #[serde(default)]
    pub caller_context: Option<String>,
}

impl FactCheckRequest {
    /// Create a request with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            subject_name: None,
            caller_context: None,
        }
    }

    /// Set the subject name.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject_name = Some(subject.into());
        self
    }

    /// Set the caller context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.caller_context = Some(context.into());
        self
    }
}
