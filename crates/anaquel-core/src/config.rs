//! Configuration for the catalog client
//!
//! Endpoints, result sizing, and the two catalog conventions (product
//! URL id pattern, title stopwords) that are constants of the data
//! source rather than of this crate.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::deduplication::{TitleNormalizer, DEFAULT_TITLE_STOPWORDS};
use crate::identifiers::{IdExtractor, DEFAULT_URL_ID_PATTERN};

/// Everything a [`crate::client::CatalogSearcher`] needs to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Service endpoints
    pub endpoints: EndpointConfig,
    /// Result sizing and timing
    pub tuning: TuningConfig,
    /// Catalog-specific data conventions
    pub conventions: CatalogConventions,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            tuning: TuningConfig::default(),
            conventions: CatalogConventions::default(),
        }
    }
}

/// Where the three services live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Search index base URL (no index name, no trailing `_search`)
    pub index_url: String,
    /// Index name appended to the base URL
    pub index_name: String,
    /// Index API key; sent as `Authorization: ApiKey <key>` when set
    pub api_key: String,
    /// Suggestion broker endpoint
    pub broker_url: String,
    /// Batch pricing endpoint
    pub pricing_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            index_url: String::new(),
            index_name: "search-books".to_string(),
            api_key: String::new(),
            broker_url: String::new(),
            pricing_url: String::new(),
        }
    }
}

impl EndpointConfig {
    /// Read endpoints from `ANAQUEL_*` environment variables, keeping
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            index_url: env_or("ANAQUEL_INDEX_URL", defaults.index_url),
            index_name: env_or("ANAQUEL_INDEX_NAME", defaults.index_name),
            api_key: env_or("ANAQUEL_API_KEY", defaults.api_key),
            broker_url: env_or("ANAQUEL_BROKER_URL", defaults.broker_url),
            pricing_url: env_or("ANAQUEL_PRICING_URL", defaults.pricing_url),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

/// Result sizing and timing knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Result cap for as-you-type quick searches
    pub quick_size: usize,
    /// Result cap for submitted searches
    pub submit_size: usize,
    /// Result cap for suggestion queries (broker-provided or fallback)
    pub suggestion_size: usize,
    /// Quiet window between the last keystroke and the quick search
    pub debounce_ms: u64,
    /// Per-request HTTP timeout
    pub http_timeout_secs: u64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            quick_size: 5,
            submit_size: 20,
            suggestion_size: 8,
            debounce_ms: 300,
            http_timeout_secs: 30,
        }
    }
}

impl TuningConfig {
    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.http_timeout_secs)
    }
}

/// Conventions of the catalog being searched. These are properties of
/// the data source: a different store means a different URL shape and
/// different edition noise in titles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConventions {
    /// Regex extracting the numeric product id from a product URL path;
    /// must capture it as a named group `id`
    pub url_id_pattern: String,
    /// Title tokens treated as edition noise during deduplication
    pub title_stopwords: Vec<String>,
}

impl Default for CatalogConventions {
    fn default() -> Self {
        Self {
            url_id_pattern: DEFAULT_URL_ID_PATTERN.to_string(),
            title_stopwords: DEFAULT_TITLE_STOPWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CatalogConventions {
    pub fn extractor(&self) -> Result<IdExtractor, ConfigError> {
        IdExtractor::new(&self.url_id_pattern)
            .map_err(|e| ConfigError::InvalidPattern(format!("url_id_pattern: {}", e)))
    }

    pub fn normalizer(&self) -> TitleNormalizer {
        TitleNormalizer::new(self.title_stopwords.iter().cloned())
    }
}

impl SearchConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoints from the environment, everything else default.
    pub fn from_env() -> Self {
        Self {
            endpoints: EndpointConfig::from_env(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("index_url", &self.endpoints.index_url),
            ("index_name", &self.endpoints.index_name),
            ("broker_url", &self.endpoints.broker_url),
            ("pricing_url", &self.endpoints.pricing_url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(name.to_string()));
            }
        }

        for (name, value) in [
            ("index_url", &self.endpoints.index_url),
            ("broker_url", &self.endpoints.broker_url),
            ("pricing_url", &self.endpoints.pricing_url),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::InvalidUrl(format!("{}: {}", name, value)));
            }
        }

        if self.tuning.quick_size == 0
            || self.tuning.submit_size == 0
            || self.tuning.suggestion_size == 0
        {
            return Err(ConfigError::OutOfRange(
                "result sizes must be positive".to_string(),
            ));
        }

        if self.tuning.http_timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "http_timeout_secs must be positive".to_string(),
            ));
        }

        // Surface a bad pattern here instead of at first extraction.
        self.conventions.extractor()?;

        Ok(())
    }
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Required field is missing
    MissingField(String),
    /// Endpoint is not a parseable URL
    InvalidUrl(String),
    /// Convention regex does not compile
    InvalidPattern(String),
    /// Value is out of valid range
    OutOfRange(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField(msg) => write!(f, "Missing field: {}", msg),
            ConfigError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            ConfigError::InvalidPattern(msg) => write!(f, "Invalid pattern: {}", msg),
            ConfigError::OutOfRange(msg) => write!(f, "Value out of range: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
