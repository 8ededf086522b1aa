//! Fact-check pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Claim extraction (sentence segmentation + relevance heuristic)
//! - Context resolution (locale and identity fallback over knowledge sources)
//! - Prompt building (fixed machine-parseable answer schema)
//! - Generation (blocking or streaming)
//! - Response parsing into typed verification outcomes

pub mod claims;
pub mod orchestrator;
pub mod parse;
pub mod prompts;
pub mod resolve;

pub use claims::{extract_claims, extract_keywords};
pub use orchestrator::FactCheckOrchestrator;
pub use parse::parse_model_response;
pub use prompts::build_verification_prompt;
pub use resolve::{ContextResolver, Resolution};
