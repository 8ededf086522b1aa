//! Fact-Check Pipeline Library
//!
//! Verifies factual claims in free-form text against encyclopedic sources
//! and a local LLM. A message is split into candidate claims, each claim is
//! grounded in Wikipedia/Wikidata/Wikiquote context, and a structured
//! verification verdict is parsed from the model's response.
//!
//! # Design Philosophy
//!
//! - Heuristic claim extraction, no NLP model in the loop
//! - Degrade, never fail: missing context and malformed model output both
//!   produce UNVERIFIABLE verdicts instead of errors
//! - Deterministic prompts: the same inputs always build the same prompt
//! - Sources behind narrow traits so tests run without the network
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use factcheck::{ContextResolver, FactCheckOrchestrator, FactCheckRequest, PipelineConfig};
//! use factcheck::sources::{WikidataClient, WikipediaClient, WikiquoteClient};
//! use ollama_client::OllamaClient;
//!
//! let config = PipelineConfig::default();
//! let resolver = Arc::new(ContextResolver::new(
//!     Arc::new(WikipediaClient::new()),
//!     Arc::new(WikidataClient::new()),
//!     config.primary_locale.clone(),
//!     config.fallback_locale.clone(),
//! ));
//! let orchestrator = FactCheckOrchestrator::new(
//!     resolver,
//!     Arc::new(WikiquoteClient::new()),
//!     Arc::new(OllamaClient::new("http://localhost:11434")),
//!     config,
//! );
//!
//! let request = FactCheckRequest::new("Mikołaj Kopernik urodził się w 1473 roku w Toruniu.");
//! let outcomes = orchestrator.fact_check(&request).await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (KnowledgeSource, EntitySource, QuoteSource, Generator)
//! - [`types`] - Pipeline data types and configuration
//! - [`pipeline`] - Claim extraction, context resolution, prompts, parsing, orchestration
//! - [`sources`] - Wikimedia client implementations with rate limiting
//! - [`testing`] - Mock implementations for testing

pub mod cache;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FactCheckError, SourceError};
pub use pipeline::{
    build_verification_prompt, extract_claims, extract_keywords, parse_model_response,
    ContextResolver, FactCheckOrchestrator, Resolution,
};
pub use traits::{
    generator::{FragmentStream, Generator},
    knowledge::{EntitySource, KnowledgeSource, QuoteSource},
};
pub use types::{
    claim::Claim,
    config::PipelineConfig,
    context::ReferenceContext,
    event::StreamEvent,
    outcome::{VerificationLabel, VerificationOutcome},
    request::FactCheckRequest,
};
