//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for POST /cache/invalidate
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidationRequest {
    /// Product ID whose cache entry should be dropped; non-positive IDs match nothing
    pub id: i64,
}

/// Request body for PUT /cache/:key
///
/// The product ID comes from the path, so only the payload is sent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProductRequest {
    pub name: String,
    pub price: f64,
}

impl UpsertProductRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Product name cannot be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Some("Product price must be a non-negative number".to_string());
        }
        None
    }
}
