//! Suggestion reconciliation
//!
//! The pure half of the suggestion pipeline: computing the exclusion
//! set from primary results and winnowing raw secondary hits down to
//! the deduplicated strip. The async half (broker call, fallback,
//! execution) lives on [`crate::client::CatalogSearcher`]; keeping the
//! set logic here keeps it testable without any network.
//!
//! The broker is asked to exclude already-shown ids server-side, and
//! the same filter runs again here on whatever comes back. The two
//! layers are deliberate: the broker's exclusion is advisory, this one
//! is the guarantee.

use std::collections::HashSet;

use crate::deduplication::{dedup_by_title, filter_excluded, TitleNormalizer};
use crate::domain::BookRecord;
use crate::identifiers::{collect_ids, CanonicalId, IdExtractor};

/// Canonical ids of the records already on screen, in first-seen
/// order. Sent to the broker and reused for local re-filtering.
pub fn exclusion_ids(extractor: &IdExtractor, primary: &[BookRecord]) -> Vec<CanonicalId> {
    collect_ids(extractor, primary)
}

/// Winnow raw secondary hits: drop everything already on screen, then
/// collapse near-duplicate editions, keeping the index's ranking
/// order. Returns however much survives; an empty result is a normal
/// outcome, not a failure.
pub fn winnow(
    extractor: &IdExtractor,
    normalizer: &TitleNormalizer,
    excluded: &HashSet<CanonicalId>,
    raw: Vec<BookRecord>,
) -> Vec<BookRecord> {
    let filtered = filter_excluded(extractor, excluded, raw);
    dedup_by_title(normalizer, filtered)
}
