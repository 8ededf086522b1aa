//! Knowledge source clients.
//!
//! Concrete implementations of the source traits, plus a rate-limiting
//! decorator that applies to any of them.

pub mod rate_limited;
pub mod wikidata;
pub mod wikipedia;
pub mod wikiquote;

pub use rate_limited::RateLimited;
pub use wikidata::WikidataClient;
pub use wikipedia::WikipediaClient;
pub use wikiquote::WikiquoteClient;
