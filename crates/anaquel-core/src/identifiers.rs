//! Canonical identifier extraction
//!
//! The search index, the suggestion broker, and the pricing service all
//! describe the same catalog items in differently-shaped payloads; the
//! only way to reconcile them is one canonical identifier derived per
//! record. Extraction priority: explicit SKU, then the numeric id in
//! the product URL, then ISBN.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::domain::BookRecord;

/// Product-URL pattern the default extractor recognizes: a numeric id
/// as its own `/p/<digits>` path segment, the store's canonical product
/// page shape. Configurable per catalog via [`IdExtractor::new`].
pub const DEFAULT_URL_ID_PATTERN: &str = r"/p/(?P<id>\d+)(?:[/?#]|$)";

lazy_static! {
    static ref DEFAULT_EXTRACTOR: IdExtractor = IdExtractor::default();
}

/// The identifier chosen to represent one catalog item across every
/// service: exclusion sets, dedup bookkeeping, and price-map keys all
/// use this type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalId(String);

impl CanonicalId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CanonicalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Extracts canonical ids from catalog records.
pub struct IdExtractor {
    url_id: Regex,
}

impl Default for IdExtractor {
    fn default() -> Self {
        Self {
            url_id: Regex::new(DEFAULT_URL_ID_PATTERN).expect("default URL id pattern compiles"),
        }
    }
}

impl IdExtractor {
    /// Build an extractor with a catalog-specific URL pattern. The
    /// pattern must expose the numeric id as a named group `id`.
    pub fn new(url_id_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            url_id: Regex::new(url_id_pattern)?,
        })
    }

    /// Derive the canonical id for a record, or `None` when the record
    /// carries none of the three identifier shapes. Absence is a normal
    /// outcome, not an error: records without an id stay in result
    /// lists, they just never join exclusion sets or price maps.
    pub fn extract(&self, record: &BookRecord) -> Option<CanonicalId> {
        if let Some(sku) = non_empty(record.sku_id.as_deref()) {
            return Some(CanonicalId::new(sku));
        }

        if let Some(id) = self.id_from_url(&record.url) {
            return Some(CanonicalId::new(id));
        }

        non_empty(record.isbn.as_deref()).map(|isbn| CanonicalId::new(normalize_isbn(isbn)))
    }

    /// Match the id pattern against the URL path. Malformed URLs are
    /// matched as raw strings so relative product paths still resolve;
    /// no input shape can make this fail.
    fn id_from_url(&self, url: &str) -> Option<String> {
        if url.is_empty() {
            return None;
        }

        let captures = match Url::parse(url) {
            Ok(parsed) => self.url_id.captures(parsed.path()).map(|c| {
                c.name("id")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            }),
            Err(_) => self.url_id.captures(url).map(|c| {
                c.name("id")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            }),
        };

        captures.filter(|id| !id.is_empty())
    }
}

/// Extract with the default catalog pattern.
pub fn extract_id(record: &BookRecord) -> Option<CanonicalId> {
    DEFAULT_EXTRACTOR.extract(record)
}

/// Canonical ids for a batch of records: first-seen order, duplicates
/// and id-less records dropped. Feeds exclusion lists and price
/// requests, both of which want a stable, compact id set.
pub fn collect_ids(extractor: &IdExtractor, records: &[BookRecord]) -> Vec<CanonicalId> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .filter_map(|record| extractor.extract(record))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Strip separators so hyphenated and bare ISBN spellings reconcile to
/// the same id.
fn normalize_isbn(isbn: &str) -> String {
    isbn.chars().filter(|c| !matches!(c, '-' | ' ')).collect()
}
