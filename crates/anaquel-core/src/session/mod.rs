//! Per-query session state
//!
//! A [`SearchSession`] is the single owner of everything one search box
//! shows: query text, mode, result lists, prices, loading/error flags.
//! It is created empty, reset by new input, and dropped with the
//! surface that owns it; nothing persists.
//!
//! Responses are applied through ticket-gated methods so late arrivals
//! from superseded requests are discarded instead of clobbering newer
//! state: quick searches are gated by the debouncer's ticket, submitted
//! searches (and their suggestion/price follow-ups) by a submit
//! generation counter.

pub mod debounce;
pub mod mode;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use mode::SearchMode;

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{BookRecord, PriceEntry, PriceMap};
use crate::error::SearchError;
use crate::identifiers::CanonicalId;

#[derive(Debug, Default)]
pub struct SearchSession {
    query: String,
    mode: SearchMode,
    author_pill: Option<String>,
    results: Vec<BookRecord>,
    quick_results: Vec<BookRecord>,
    suggestions: Vec<BookRecord>,
    prices: PriceMap,
    loading: bool,
    error: Option<String>,
    debounce: Arc<Debouncer>,
    submit_generation: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with a non-default quick-search quiet window.
    pub fn with_debounce(delay: Duration) -> Self {
        Self {
            debounce: Arc::new(Debouncer::new(delay)),
            ..Default::default()
        }
    }

    // --- input events ---

    /// The user edited the search box. Fresh text dissolves an active
    /// author pill; the input goes back to plain general search.
    /// Returns the debounce ticket for the quick search this keystroke
    /// schedules.
    pub fn type_text(&mut self, value: &str) -> u64 {
        if self.mode == SearchMode::Author && !value.is_empty() {
            self.leave_author_mode();
        }
        self.query = value.to_string();
        if value.trim().is_empty() {
            self.quick_results.clear();
        }
        self.debounce.note_keystroke()
    }

    /// Backspace with the input already empty. With an author pill
    /// active this dissolves the pill; otherwise there is nothing to
    /// do (ordinary text edits arrive through [`Self::type_text`]).
    pub fn press_backspace(&mut self) {
        if self.mode == SearchMode::Author && self.query.is_empty() {
            self.leave_author_mode();
        }
    }

    /// The user clicked an author badge: the author name becomes a
    /// pill and the search is re-run author-weighted.
    pub fn select_author(&mut self, name: &str) {
        self.mode = SearchMode::Author;
        self.author_pill = Some(name.to_string());
        self.query.clear();
        self.quick_results.clear();
    }

    /// The user dismissed the author pill.
    pub fn remove_author_pill(&mut self) {
        self.leave_author_mode();
    }

    fn leave_author_mode(&mut self) {
        self.mode = SearchMode::General;
        self.author_pill = None;
    }

    /// The text the next search should run on: the pill name while an
    /// author pill is active, the typed query otherwise.
    pub fn search_text(&self) -> &str {
        match self.mode {
            SearchMode::Author => self.author_pill.as_deref().unwrap_or(&self.query),
            SearchMode::General => &self.query,
        }
    }

    // --- response application, ticket-gated ---

    /// Start a submitted search: bumps the submit generation (stale
    /// in-flight submits will be discarded on arrival), raises the
    /// loading flag, clears any prior error. Prices are dropped too;
    /// the new query's batches rebuild the map from empty.
    pub fn begin_submit(&mut self) -> u64 {
        self.submit_generation += 1;
        self.loading = true;
        self.error = None;
        self.quick_results.clear();
        self.prices.clear();
        self.submit_generation
    }

    /// Apply a submitted-search outcome. Returns `false` (and changes
    /// nothing) when a newer submit has superseded `ticket`.
    pub fn apply_submit(
        &mut self,
        ticket: u64,
        outcome: Result<Vec<BookRecord>, SearchError>,
    ) -> bool {
        if ticket != self.submit_generation {
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(records) => {
                self.results = records;
                self.error = None;
            }
            Err(err) => {
                self.results.clear();
                self.suggestions.clear();
                self.error = Some(err.user_message().to_string());
            }
        }
        true
    }

    /// Apply quick-search hits. Returns `false` when a newer keystroke
    /// has superseded `ticket`.
    pub fn apply_quick(&mut self, ticket: u64, hits: Vec<BookRecord>) -> bool {
        if !self.debounce.is_current(ticket) {
            return false;
        }
        self.quick_results = hits;
        true
    }

    /// Apply the suggestion strip for the submit identified by `ticket`.
    pub fn apply_suggestions(&mut self, ticket: u64, suggestions: Vec<BookRecord>) -> bool {
        if ticket != self.submit_generation {
            return false;
        }
        self.suggestions = suggestions;
        true
    }

    /// Fold a fetched price batch into the session map. The result
    /// list and the suggestion strip are priced as separate batches of
    /// the same submit; an id carried by a later batch takes the new
    /// entry whole, and a new submit starts the map empty.
    pub fn apply_prices(&mut self, ticket: u64, prices: PriceMap) -> bool {
        if ticket != self.submit_generation {
            return false;
        }
        self.prices.extend(prices);
        true
    }

    // --- accessors ---

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn author_pill(&self) -> Option<&str> {
        self.author_pill.as_deref()
    }

    pub fn results(&self) -> &[BookRecord] {
        &self.results
    }

    pub fn quick_results(&self) -> &[BookRecord] {
        &self.quick_results
    }

    pub fn suggestions(&self) -> &[BookRecord] {
        &self.suggestions
    }

    pub fn price_for(&self, id: &CanonicalId) -> Option<&PriceEntry> {
        self.prices.get(id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn debouncer(&self) -> Arc<Debouncer> {
        self.debounce.clone()
    }
}
