//! Domain types for the fact-check pipeline.

pub mod claim;
pub mod config;
pub mod context;
pub mod event;
pub mod outcome;
pub mod request;

pub use claim::Claim;
pub use config::PipelineConfig;
pub use context::{ContentUrls, ReferenceContext, Thumbnail, UrlInfo};
pub use event::StreamEvent;
pub use outcome::{VerificationLabel, VerificationOutcome};
pub use request::FactCheckRequest;
