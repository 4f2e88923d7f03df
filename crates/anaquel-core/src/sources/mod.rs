//! Clients for the three remote services behind the search box
//!
//! - [`catalog`]: the hosted search index (Elasticsearch `_search` dialect)
//! - [`suggest`]: the suggestion query broker
//! - [`pricing`]: the batch price service

pub mod catalog;
pub mod pricing;
pub mod suggest;
pub mod traits;

pub use catalog::CatalogIndex;
pub use pricing::PricingService;
pub use suggest::SuggestionBroker;
pub use traits::{PriceSource, QueryExecutor, SourceError, SuggestionQuerySource};
