//! Common traits and errors for the service clients
//!
//! The orchestrator talks to the services through these traits so
//! tests can swap in scripted fakes without a network.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{BookRecord, PriceMap};
use crate::http::HttpError;
use crate::identifiers::CanonicalId;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl SourceError {
    /// Build a status error, keeping only the head of the body so log
    /// lines stay readable.
    pub fn status(status: u16, body: &str) -> Self {
        let body = if body.len() > 200 {
            let cut = body
                .char_indices()
                .take_while(|(i, _)| *i < 200)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            format!("{}...", &body[..cut])
        } else {
            body.to_string()
        };
        SourceError::Status { status, body }
    }
}

/// Runs ready-to-send query bodies against the search index.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, body: &Value) -> Result<Vec<BookRecord>, SourceError>;
}

/// Asks the broker to compose a secondary query for related items.
#[async_trait]
pub trait SuggestionQuerySource: Send + Sync {
    /// `None` covers every failure shape - transport errors, non-2xx
    /// statuses, and malformed payloads - because the caller's answer
    /// to all of them is the same local fallback.
    async fn secondary_query(&self, query: &str, excluded: &[CanonicalId]) -> Option<Value>;
}

/// Fetches prices for a batch of canonical ids in one request.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn prices_for(&self, ids: &[CanonicalId]) -> Result<PriceMap, SourceError>;
}
