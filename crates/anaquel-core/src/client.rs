//! Catalog searcher: orchestrates the three service clients
//!
//! One owner for the whole failure policy: index errors on the primary
//! path surface as [`SearchError`]; a failed or malformed broker answer
//! silently turns into a locally-built fallback query; a failed price
//! fetch turns into an empty price map. The searcher is stateless
//! across calls - per-query state belongs to
//! [`crate::session::SearchSession`].

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{ConfigError, SearchConfig, TuningConfig};
use crate::deduplication::TitleNormalizer;
use crate::domain::{BookRecord, PriceMap};
use crate::error::SearchError;
use crate::identifiers::{collect_ids, CanonicalId, IdExtractor};
use crate::search::{
    apply_result_cap, ensure_projection, fallback_suggestion_query, primary_query,
};
use crate::session::SearchMode;
use crate::sources::{
    CatalogIndex, PriceSource, PricingService, QueryExecutor, SuggestionBroker,
    SuggestionQuerySource,
};
use crate::suggest;

/// Which surface a search serves; decides the result cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// As-you-type quick search: few results, low latency.
    Quick,
    /// Submitted search: the full result page.
    Submit,
}

pub struct CatalogSearcher {
    tuning: TuningConfig,
    extractor: IdExtractor,
    normalizer: TitleNormalizer,
    index: Arc<dyn QueryExecutor>,
    broker: Arc<dyn SuggestionQuerySource>,
    pricing: Arc<dyn PriceSource>,
}

impl CatalogSearcher {
    /// Build a searcher with HTTP clients for the configured endpoints.
    pub fn new(config: &SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let timeout = config.tuning.http_timeout();
        let index = Arc::new(CatalogIndex::new(
            &config.endpoints.index_url,
            &config.endpoints.index_name,
            &config.endpoints.api_key,
            timeout,
        ));
        let broker = Arc::new(SuggestionBroker::new(&config.endpoints.broker_url, timeout));
        let pricing = Arc::new(PricingService::new(&config.endpoints.pricing_url, timeout));

        Self::with_sources(config, index, broker, pricing)
    }

    /// Build with caller-provided service implementations; endpoints in
    /// `config` are ignored. This is the seam tests use to script the
    /// services.
    pub fn with_sources(
        config: &SearchConfig,
        index: Arc<dyn QueryExecutor>,
        broker: Arc<dyn SuggestionQuerySource>,
        pricing: Arc<dyn PriceSource>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            tuning: config.tuning.clone(),
            extractor: config.conventions.extractor()?,
            normalizer: config.conventions.normalizer(),
            index,
            broker,
            pricing,
        })
    }

    /// Run a primary search. An empty query is answered locally with no
    /// request; an index failure is the one error surfaced to callers.
    pub async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        kind: SearchKind,
    ) -> Result<Vec<BookRecord>, SearchError> {
        let text = query.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let size = match kind {
            SearchKind::Quick => self.tuning.quick_size,
            SearchKind::Submit => self.tuning.submit_size,
        };

        let body = primary_query(text, mode, size);
        let hits = self.index.execute(&body).await?;
        debug!(hits = hits.len(), ?mode, ?kind, "primary search complete");

        Ok(hits)
    }

    /// Run the suggestion pipeline for a submitted query.
    ///
    /// Ask the broker for a secondary query (falling back to a local
    /// one), execute it, then winnow the hits against what is already
    /// on screen. Never fails: any error along the way degrades to an
    /// empty strip.
    pub async fn suggestions(&self, query: &str, primary: &[BookRecord]) -> Vec<BookRecord> {
        let text = query.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let excluded = suggest::exclusion_ids(&self.extractor, primary);

        let body = match self.broker.secondary_query(text, &excluded).await {
            Some(mut body) => {
                apply_result_cap(&mut body, self.tuning.suggestion_size);
                ensure_projection(&mut body);
                body
            }
            None => {
                debug!("suggestion broker degraded; using local fallback query");
                fallback_suggestion_query(text, self.tuning.suggestion_size)
            }
        };

        let raw = match self.index.execute(&body).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "suggestion query failed");
                return Vec::new();
            }
        };

        let excluded: HashSet<CanonicalId> = excluded.into_iter().collect();
        suggest::winnow(&self.extractor, &self.normalizer, &excluded, raw)
    }

    /// Fetch prices for a record batch. Records without a canonical id
    /// are never sent; a failed fetch logs and yields an empty map so
    /// rendering proceeds without prices.
    pub async fn prices(&self, records: &[BookRecord]) -> PriceMap {
        let ids = collect_ids(&self.extractor, records);
        if ids.is_empty() {
            return PriceMap::new();
        }

        match self.pricing.prices_for(&ids).await {
            Ok(prices) => prices,
            Err(err) => {
                warn!(error = %err, "price fetch failed; rendering without prices");
                PriceMap::new()
            }
        }
    }

    /// Canonical id of a record under this searcher's conventions.
    pub fn id_of(&self, record: &BookRecord) -> Option<CanonicalId> {
        self.extractor.extract(record)
    }
}
