//! Suggestion query broker client
//!
//! The broker takes the user's text plus the ids already on screen and
//! composes a secondary index query for related items. It is an
//! optimization, never a requirement: every failure - unreachable
//! host, bad status, malformed body - degrades to `None`, and the
//! caller falls back to a locally-built query.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::traits::SuggestionQuerySource;
use crate::http::HttpClient;
use crate::identifiers::CanonicalId;

pub struct SuggestionBroker {
    client: HttpClient,
    base_url: String,
}

impl SuggestionBroker {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Self {
        Self {
            client: HttpClient::with_timeout("anaquel/0.1", timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the broker request URL: `?q=<text>&exclude=<id,id,...>`,
    /// the exclude parameter omitted when nothing is on screen.
    pub fn request_url(base_url: &str, query: &str, excluded: &[CanonicalId]) -> String {
        let mut url = format!(
            "{}?q={}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        );

        if !excluded.is_empty() {
            let ids = excluded
                .iter()
                .map(CanonicalId::as_str)
                .collect::<Vec<_>>()
                .join(",");
            url.push_str("&exclude=");
            url.push_str(&urlencoding::encode(&ids));
        }

        url
    }

    /// Pull the composed query body out of a broker response. The
    /// contract is a JSON object with a `query` member holding a
    /// ready-to-run index body; anything else is malformed and yields
    /// `None`.
    pub fn parse_broker_response(json: &str) -> Option<Value> {
        let mut response: Value = serde_json::from_str(json).ok()?;
        let body = response.get_mut("query")?.take();

        if body.is_object() {
            Some(body)
        } else {
            None
        }
    }
}

#[async_trait]
impl SuggestionQuerySource for SuggestionBroker {
    async fn secondary_query(&self, query: &str, excluded: &[CanonicalId]) -> Option<Value> {
        let url = Self::request_url(&self.base_url, query, excluded);

        let response = match self.client.get(&url).await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "suggestion broker unreachable");
                return None;
            }
        };

        if !(200..300).contains(&response.status) {
            debug!(status = response.status, "suggestion broker returned error status");
            return None;
        }

        let body = Self::parse_broker_response(&response.body);
        if body.is_none() {
            debug!("suggestion broker response missing usable query");
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "query": {
            "query": {
                "multi_match": {
                    "query": "galaxias",
                    "fields": ["tags^4", "title"]
                }
            },
            "size": 8
        }
    }"#;

    #[test]
    fn test_parse_broker_response() {
        let body = SuggestionBroker::parse_broker_response(SAMPLE_RESPONSE).unwrap();

        assert_eq!(body["size"], 8);
        assert_eq!(body["query"]["multi_match"]["query"], "galaxias");
    }

    #[test]
    fn test_parse_rejects_missing_query_member() {
        assert!(SuggestionBroker::parse_broker_response(r#"{"status": "ok"}"#).is_none());
    }

    #[test]
    fn test_parse_rejects_non_object_query() {
        assert!(SuggestionBroker::parse_broker_response(r#"{"query": "galaxias"}"#).is_none());
        assert!(SuggestionBroker::parse_broker_response(r#"{"query": null}"#).is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(SuggestionBroker::parse_broker_response("<html>502</html>").is_none());
        assert!(SuggestionBroker::parse_broker_response("").is_none());
    }

    #[test]
    fn test_request_url_encodes_query() {
        let url = SuggestionBroker::request_url(
            "https://broker.example.mx/related",
            "cien años",
            &[CanonicalId::from("10"), CanonicalId::from("20")],
        );

        assert_eq!(
            url,
            "https://broker.example.mx/related?q=cien%20a%C3%B1os&exclude=10%2C20"
        );
    }

    #[test]
    fn test_request_url_omits_empty_exclude() {
        let url = SuggestionBroker::request_url("https://broker.example.mx/related", "sol", &[]);

        assert_eq!(url, "https://broker.example.mx/related?q=sol");
    }
}
