//! Hosted search-index client
//!
//! The index speaks the Elasticsearch `_search` dialect: query bodies
//! are POSTed to `{base}/{index}/_search` with an `ApiKey`
//! authorization header, hits come back under `hits.hits[]._source`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::traits::{QueryExecutor, SourceError};
use crate::domain::BookRecord;
use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_source")]
    source: BookRecord,
}

pub struct CatalogIndex {
    client: HttpClient,
    base_url: String,
    index: String,
    api_key: String,
}

impl CatalogIndex {
    pub fn new(base_url: &str, index: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            client: HttpClient::with_timeout("anaquel/0.1", timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url, self.index)
    }

    /// Parse a `_search` response body into records, in hit order.
    pub fn parse_search_response(json: &str) -> Result<Vec<BookRecord>, SourceError> {
        let response: SearchResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid search response: {}", e)))?;

        Ok(response
            .hits
            .hits
            .into_iter()
            .map(|hit| hit.source)
            .collect())
    }
}

#[async_trait]
impl QueryExecutor for CatalogIndex {
    async fn execute(&self, body: &Value) -> Result<Vec<BookRecord>, SourceError> {
        let authorization = format!("ApiKey {}", self.api_key);
        let mut headers: Vec<(&str, &str)> = Vec::new();
        if !self.api_key.is_empty() {
            headers.push(("Authorization", authorization.as_str()));
        }

        let response = self
            .client
            .post_json(&self.search_url(), &headers, body)
            .await?;

        if !(200..300).contains(&response.status) {
            return Err(SourceError::status(response.status, &response.body));
        }

        Self::parse_search_response(&response.body)
    }
}
