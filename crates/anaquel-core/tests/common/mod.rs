//! Shared helpers for integration tests

// Not every test binary uses every helper.
#![allow(dead_code)]

pub mod fakes;

use anaquel_core::BookRecord;

/// Record with just a title and sku, the fields reconciliation cares about.
pub fn record(title: &str, sku: Option<&str>) -> BookRecord {
    BookRecord {
        title: title.to_string(),
        author: "Autor de Prueba".to_string(),
        sku_id: sku.map(String::from),
        ..Default::default()
    }
}

/// Record identified only by its product URL.
pub fn record_with_url(title: &str, url: &str) -> BookRecord {
    BookRecord {
        title: title.to_string(),
        author: "Autor de Prueba".to_string(),
        url: url.to_string(),
        ..Default::default()
    }
}
