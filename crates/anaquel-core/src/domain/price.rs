//! Price data joined onto catalog records

use crate::identifiers::CanonicalId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// List/selling price pair for one catalog item, in the store currency.
///
/// `selling_price` equals `list_price` when the item is not on offer;
/// consumers branch on the inequality, never on a separate flag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(rename = "listPrice")]
    pub list_price: f64,
    #[serde(rename = "sellingPrice")]
    pub selling_price: f64,
}

impl PriceEntry {
    /// Whether the selling price is an actual markdown from list.
    pub fn is_discounted(&self) -> bool {
        self.selling_price < self.list_price
    }
}

/// Prices keyed by canonical id, fetched fresh per result batch.
pub type PriceMap = HashMap<CanonicalId, PriceEntry>;
