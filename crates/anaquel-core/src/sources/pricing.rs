//! Batch price service client
//!
//! One GET per result batch: `?ids=<id,id,...>` returns a JSON object
//! keyed by canonical id. Ids the service does not know are simply
//! absent from the response, which is not an error.

use async_trait::async_trait;
use std::collections::HashMap;

use super::traits::{PriceSource, SourceError};
use crate::domain::{PriceEntry, PriceMap};
use crate::http::HttpClient;
use crate::identifiers::CanonicalId;

pub struct PricingService {
    client: HttpClient,
    base_url: String,
}

impl PricingService {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Self {
        Self {
            client: HttpClient::with_timeout("anaquel/0.1", timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the batch request URL: `?ids=<id,id,...>`.
    pub fn request_url(base_url: &str, ids: &[CanonicalId]) -> String {
        let joined = ids
            .iter()
            .map(CanonicalId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}?ids={}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(&joined)
        )
    }

    /// Parse a price response body. Entries that do not carry both
    /// price fields are skipped rather than failing the batch.
    pub fn parse_price_response(json: &str) -> Result<PriceMap, SourceError> {
        let entries: HashMap<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid price response: {}", e)))?;

        Ok(entries
            .into_iter()
            .filter_map(|(id, value)| {
                let entry: PriceEntry = serde_json::from_value(value).ok()?;
                Some((CanonicalId::new(id), entry))
            })
            .collect())
    }
}

#[async_trait]
impl PriceSource for PricingService {
    async fn prices_for(&self, ids: &[CanonicalId]) -> Result<PriceMap, SourceError> {
        let url = Self::request_url(&self.base_url, ids);
        let response = self.client.get(&url).await?;

        if !(200..300).contains(&response.status) {
            return Err(SourceError::status(response.status, &response.body));
        }

        Self::parse_price_response(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "120934": {"listPrice": 399.0, "sellingPrice": 319.0},
        "884213": {"listPrice": 250.0, "sellingPrice": 250.0}
    }"#;

    #[test]
    fn test_parse_price_response() {
        let prices = PricingService::parse_price_response(SAMPLE_RESPONSE).unwrap();

        assert_eq!(prices.len(), 2);
        let entry = prices.get(&CanonicalId::from("120934")).unwrap();
        assert_eq!(entry.selling_price, 319.0);
        assert!(entry.is_discounted());
    }

    #[test]
    fn test_parse_skips_incomplete_entries() {
        let json = r#"{
            "1": {"listPrice": 100.0, "sellingPrice": 90.0},
            "2": {"listPrice": 100.0},
            "3": "agotado"
        }"#;
        let prices = PricingService::parse_price_response(json).unwrap();

        assert_eq!(prices.len(), 1);
        assert!(prices.contains_key(&CanonicalId::from("1")));
    }

    #[test]
    fn test_parse_rejects_non_object_payload() {
        assert!(PricingService::parse_price_response("[1, 2]").is_err());
        assert!(PricingService::parse_price_response("oops").is_err());
    }

    #[test]
    fn test_request_url() {
        let url = PricingService::request_url(
            "https://precios.example.mx/batch/",
            &[CanonicalId::from("120934"), CanonicalId::from("884213")],
        );

        assert_eq!(
            url,
            "https://precios.example.mx/batch?ids=120934%2C884213"
        );
    }
}
