//! Stream events - the caller-visible streaming protocol.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::outcome::VerificationOutcome;

/// One unit in the caller-visible streaming protocol.
///
/// These events represent facts about the verification lifecycle, not
/// commands. They exist only for the duration of one streaming call and map
/// one-to-one onto named server-sent events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Verification started.
    Start,

    /// Reference context was resolved; carries the source title.
    SourceFound(String),

    /// No reference context could be resolved.
    SourceMissing,

    /// Prompt built, generation about to begin.
    PromptReady,

    /// Incremental formatted text from the model.
    Chunk(String),

    /// The parsed verification outcome.
    Final(VerificationOutcome),

    /// Verification finished; no further events follow.
    Complete,

    /// A terminal error; no further events follow.
    Error(String),
}

impl StreamEvent {
    /// SSE event name for the caller-facing wire protocol.
    pub fn event_name(&self) -> &'static str {
        match self {
            StreamEvent::Start => "start",
            StreamEvent::SourceFound(_) | StreamEvent::SourceMissing => "wiki",
            StreamEvent::PromptReady => "prompt",
            StreamEvent::Chunk(_) => "chunk",
            StreamEvent::Final(_) => "final",
            StreamEvent::Complete => "complete",
            StreamEvent::Error(_) => "error",
        }
    }

    /// SSE data payload for the caller-facing wire protocol.
    ///
    /// Human-readable for lifecycle events, raw text for chunks, and a JSON
    /// document for the final outcome.
    pub fn event_data(&self) -> Result<String> {
        Ok(match self {
            StreamEvent::Start => "Starting verification...".to_string(),
            StreamEvent::SourceFound(title) => format!("Found Wikipedia info: {}", title),
            StreamEvent::SourceMissing => "No Wikipedia info found".to_string(),
            StreamEvent::PromptReady => "Analyzing with AI...".to_string(),
            StreamEvent::Chunk(text) => text.clone(),
            StreamEvent::Final(outcome) => serde_json::to_string(outcome)?,
            StreamEvent::Complete => "Verification complete".to_string(),
            StreamEvent::Error(message) => format!("Error: {}", message),
        })
    }
}
