//! Catalog record as projected out of the search index

use serde::{Deserialize, Serialize};

/// One catalog item, shaped like the `_source` projection the search
/// index returns for a hit.
///
/// Index documents predate several schema additions, so everything
/// beyond the display core is optional and `#[serde(default)]` keeps
/// partial documents deserializable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    /// Product type as the index spells it (`"type"` on the wire).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "skuId")]
    pub sku_id: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    pub tags: Vec<String>,
}

impl BookRecord {
    /// Minimal record for tests and fixtures.
    pub fn titled(title: &str, author: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            ..Default::default()
        }
    }
}
