//! Core trait abstractions for the fact-check pipeline.
//!
//! These traits define the interfaces that applications implement to
//! provide knowledge sources and text generation.

pub mod generator;
pub mod knowledge;

pub use generator::{FragmentStream, Generator};
pub use knowledge::{EntitySource, KnowledgeSource, QuoteSource};
