//! Error taxonomy for the search client
//!
//! Only the primary search surfaces to the user; broker and pricing
//! failures degrade silently inside the pipeline and never reach this
//! type. Nothing here is fatal: every variant maps to an inline
//! message and a recoverable session state.

use thiserror::Error;

use crate::config::ConfigError;
use crate::sources::SourceError;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The search index itself failed; user-visible.
    #[error("search index request failed: {0}")]
    Index(#[from] SourceError),
    /// The client was built from an unusable configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl SearchError {
    /// The inline message a surface shows for this failure. Kept
    /// deliberately generic: endpoint and status details belong in
    /// logs, not next to a search box.
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::Index(_) => "Error searching books. Please try again.",
            SearchError::Config(_) => "Search is not configured correctly.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_detail() {
        let err = SearchError::Index(SourceError::status(500, "upstream exploded at 10.0.0.3"));
        assert_eq!(err.user_message(), "Error searching books. Please try again.");
        // The detail stays available for logging.
        assert!(err.to_string().contains("500"));
    }
}
