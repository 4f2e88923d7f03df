//! Scripted service implementations for pipeline tests
//!
//! Each fake counts its calls and records what it was asked, so tests
//! can assert not only on outputs but on which requests were (not)
//! issued.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anaquel_core::{
    BookRecord, CanonicalId, PriceMap, PriceSource, QueryExecutor, SourceError,
    SuggestionQuerySource,
};

/// Search-index fake replaying a queue of hit lists.
pub struct FakeIndex {
    calls: AtomicUsize,
    bodies: Mutex<Vec<Value>>,
    responses: Mutex<Vec<Result<Vec<BookRecord>, SourceError>>>,
}

impl FakeIndex {
    pub fn returning(responses: Vec<Result<Vec<BookRecord>, SourceError>>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The nth query body this fake received.
    pub fn body(&self, n: usize) -> Value {
        self.bodies.lock().unwrap()[n].clone()
    }
}

#[async_trait]
impl QueryExecutor for FakeIndex {
    async fn execute(&self, body: &Value) -> Result<Vec<BookRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().unwrap().push(body.clone());
        self.responses.lock().unwrap().remove(0)
    }
}

/// Broker fake with a fixed answer; records the exclusion list it saw.
pub struct FakeBroker {
    calls: AtomicUsize,
    excluded_seen: Mutex<Vec<Vec<CanonicalId>>>,
    response: Option<Value>,
}

impl FakeBroker {
    pub fn responding(response: Option<Value>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            excluded_seen: Mutex::new(Vec::new()),
            response,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn excluded_seen(&self, n: usize) -> Vec<CanonicalId> {
        self.excluded_seen.lock().unwrap()[n].clone()
    }
}

#[async_trait]
impl SuggestionQuerySource for FakeBroker {
    async fn secondary_query(&self, _query: &str, excluded: &[CanonicalId]) -> Option<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.excluded_seen.lock().unwrap().push(excluded.to_vec());
        self.response.clone()
    }
}

/// Pricing fake replaying a queue of price maps, one per batch.
pub struct FakePricing {
    calls: AtomicUsize,
    ids_seen: Mutex<Vec<Vec<CanonicalId>>>,
    responses: Mutex<Vec<PriceMap>>,
}

impl FakePricing {
    pub fn returning(responses: Vec<PriceMap>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            ids_seen: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn ids_seen(&self, n: usize) -> Vec<CanonicalId> {
        self.ids_seen.lock().unwrap()[n].clone()
    }
}

#[async_trait]
impl PriceSource for FakePricing {
    async fn prices_for(&self, ids: &[CanonicalId]) -> Result<PriceMap, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ids_seen.lock().unwrap().push(ids.to_vec());
        Ok(self.responses.lock().unwrap().remove(0))
    }
}
