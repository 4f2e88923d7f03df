//! anaquel-core: client-side core for a hosted book catalog
//!
//! This library provides everything behind a catalog search box except
//! the rendering:
//! - Query construction for the hosted search index (quick, submitted,
//!   and suggestion queries, with mode-dependent field boosts)
//! - Canonical identifier extraction (SKU, product-URL id, ISBN)
//! - Order-preserving deduplication by normalized title
//! - The suggestion pipeline: broker-composed secondary query with a
//!   local fallback, exclusion of already-shown items, dedup
//! - Batch price joining keyed by canonical id
//! - Per-query session state with debounce and stale-response discard
//!
//! Failure policy in one line: the primary search may surface an
//! error; everything else (broker, suggestions, prices) silently
//! degrades and the list still renders.

pub mod client;
pub mod config;
pub mod deduplication;
pub mod domain;
pub mod error;
pub mod http;
pub mod identifiers;
pub mod search;
pub mod session;
pub mod sources;
pub mod suggest;
pub mod text;

// Re-export main types for convenience
pub use client::{CatalogSearcher, SearchKind};
pub use config::{
    CatalogConventions, ConfigError, EndpointConfig, SearchConfig, TuningConfig,
};
pub use deduplication::{normalize_title, TitleNormalizer};
pub use domain::{BookRecord, PriceEntry, PriceMap};
pub use error::SearchError;
pub use identifiers::{extract_id, CanonicalId, IdExtractor};
pub use session::{Debouncer, SearchMode, SearchSession, DEFAULT_DEBOUNCE};
pub use sources::{PriceSource, QueryExecutor, SourceError, SuggestionQuerySource};
