//! Product record stored in the cache.

use serde::{Deserialize, Serialize};

/// A catalog product, returned verbatim on cache hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Products pre-loaded at startup when seeding is enabled.
pub fn demo_catalog() -> Vec<Product> {
    vec![
        Product::new(1, "Cached Product LFU", 10.0),
        Product::new(2, "Cached Product LFU", 50.0),
    ]
}
