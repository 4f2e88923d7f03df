//! Order-preserving deduplication and exclusion for result lists

pub mod normalization;

pub use normalization::{normalize_title, TitleNormalizer, DEFAULT_TITLE_STOPWORDS};

use crate::domain::BookRecord;
use crate::identifiers::{CanonicalId, IdExtractor};
use std::collections::HashSet;

/// Drop records whose normalized title was already seen, keeping the
/// first occurrence. Input order is preserved, so the index's relevance
/// ranking survives; running the pass twice changes nothing.
pub fn dedup_by_title(normalizer: &TitleNormalizer, records: Vec<BookRecord>) -> Vec<BookRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(normalizer.normalize(&record.title)))
        .collect()
}

/// Drop records whose canonical id is in the excluded set. Records
/// without any extractable id always pass: there is nothing to match
/// them against, and losing them would hide real catalog items.
pub fn filter_excluded(
    extractor: &IdExtractor,
    excluded: &HashSet<CanonicalId>,
    records: Vec<BookRecord>,
) -> Vec<BookRecord> {
    records
        .into_iter()
        .filter(|record| match extractor.extract(record) {
            Some(id) => !excluded.contains(&id),
            None => true,
        })
        .collect()
}
