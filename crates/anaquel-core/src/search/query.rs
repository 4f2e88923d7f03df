//! Query bodies for the hosted search index
//!
//! The index speaks the Elasticsearch `_search` dialect: a JSON body
//! with a `multi_match` clause, a result cap, and a `_source`
//! projection. Bodies are built as plain [`serde_json::Value`]s so the
//! broker's server-composed queries and the locally-built ones flow
//! through the same executor.

use serde_json::{json, Value};

use crate::session::SearchMode;

/// Field weights for general queries: title dominates, author close
/// behind, everything else unweighted.
pub const GENERAL_BOOST_FIELDS: &[&str] = &["title^3", "author^2", "description", "tags", "isbn"];

/// Field weights while an author pill is active: the author field
/// outweighs everything, title keeps a small edge over body fields.
pub const AUTHOR_BOOST_FIELDS: &[&str] = &["author^5", "title^2", "description", "tags", "isbn"];

/// Flat field list for the locally-built suggestion fallback.
pub const FALLBACK_SUGGESTION_FIELDS: &[&str] = &["title", "author", "description", "tags"];

/// `_source` projection: every field [`crate::domain::BookRecord`]
/// knows how to carry.
pub const SOURCE_PROJECTION: &[&str] = &[
    "title",
    "author",
    "description",
    "image",
    "url",
    "isbn",
    "publisher",
    "language",
    "type",
    "skuId",
    "releaseDate",
    "tags",
];

/// Build the primary query body for user-entered text.
pub fn primary_query(text: &str, mode: SearchMode, size: usize) -> Value {
    multi_match_body(text, boost_fields(mode), size)
}

/// Build the suggestion query used when the broker is unavailable or
/// returns something unusable: same index, flat fields, suggestion cap.
pub fn fallback_suggestion_query(text: &str, size: usize) -> Value {
    multi_match_body(text, FALLBACK_SUGGESTION_FIELDS, size)
}

/// Cap the result size of a server-composed body. The broker is
/// trusted for relevance, not for payload sizing: a missing or
/// oversized `size` is clamped to `cap`.
pub fn apply_result_cap(body: &mut Value, cap: usize) {
    if let Some(object) = body.as_object_mut() {
        let keep = object
            .get("size")
            .and_then(Value::as_u64)
            .map(|size| (size as usize).min(cap))
            .unwrap_or(cap);
        object.insert("size".to_string(), json!(keep));
    }
}

/// Add the standard `_source` projection when a server-composed body
/// omits it, so hits deserialize into full records.
pub fn ensure_projection(body: &mut Value) {
    if let Some(object) = body.as_object_mut() {
        if !object.contains_key("_source") {
            object.insert("_source".to_string(), json!(SOURCE_PROJECTION));
        }
    }
}

fn boost_fields(mode: SearchMode) -> &'static [&'static str] {
    match mode {
        SearchMode::General => GENERAL_BOOST_FIELDS,
        SearchMode::Author => AUTHOR_BOOST_FIELDS,
    }
}

fn multi_match_body(text: &str, fields: &[&str], size: usize) -> Value {
    json!({
        "query": {
            "multi_match": {
                "query": text,
                "fields": fields,
                "type": "best_fields",
                "fuzziness": "AUTO",
            }
        },
        "size": size,
        "_source": SOURCE_PROJECTION,
    })
}
