//! Domain models for the catalog client

pub mod price;
pub mod record;

pub use price::{PriceEntry, PriceMap};
pub use record::BookRecord;
