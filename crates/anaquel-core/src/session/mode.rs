//! Search mode state machine.
//!
//! Two states only:
//! - General (default): field weights favor title
//! - Author: an author pill is active and field weights favor author
//!
//! There are no other modes and no per-result-kind variants; the mode
//! changes how queries are weighted, never which component runs.

use serde::{Deserialize, Serialize};

/// The active search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SearchMode {
    /// Default free-text search.
    #[default]
    General,
    /// Author-scoped search, entered by clicking an author badge.
    Author,
}

impl SearchMode {
    /// Whether an author pill should be visible.
    pub fn has_pill(&self) -> bool {
        matches!(self, Self::Author)
    }

    /// Display name for the mode indicator.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::Author => "AUTHOR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_general() {
        assert_eq!(SearchMode::default(), SearchMode::General);
    }

    #[test]
    fn pill_only_in_author_mode() {
        assert!(!SearchMode::General.has_pill());
        assert!(SearchMode::Author.has_pill());
    }
}
