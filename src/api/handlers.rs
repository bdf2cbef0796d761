//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::cache::{BoundedCache, CacheKey};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    demo_catalog, HealthResponse, InvalidationRequest, Product, StatsResponse,
    UpsertProductRequest,
};

/// Application state shared across all handlers.
///
/// The cache does its own locking, so handlers only need a shared handle.
#[derive(Clone)]
pub struct AppState {
    /// Shared product cache
    pub cache: Arc<BoundedCache<Product>>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: BoundedCache<Product>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache with the configured capacity and policy, then loads the
    /// demo catalog when seeding is enabled.
    pub fn from_config(config: &Config) -> Self {
        let state = Self::new(BoundedCache::new(config.capacity, config.policy));
        if config.seed_products {
            state.seed(demo_catalog());
        }
        state
    }

    /// Loads products into the cache, keyed by their IDs.
    pub fn seed(&self, products: impl IntoIterator<Item = Product>) {
        for product in products {
            self.cache.put(product.id, product);
        }
    }
}

// == Helpers ==
/// Parses a path segment as a positive integer product ID.
fn parse_product_id(raw: &str) -> Result<CacheKey> {
    match raw.parse::<CacheKey>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CacheError::InvalidRequest(format!(
            "Product ID must be a positive integer, got '{}'",
            raw
        ))),
    }
}

/// Decodes a JSON body, mapping every failure to a 400.
fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| CacheError::InvalidRequest(format!("Invalid JSON format: {}", e)))
}

/// Handler for GET /cache/:key
///
/// Returns the cached product or 404.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Product>> {
    let id = parse_product_id(&key)?;
    state
        .cache
        .get(id)
        .map(Json)
        .ok_or(CacheError::NotFound(id))
}

/// Handler for PUT /cache/:key
///
/// Populates or replaces a cached product.
pub async fn put_product_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<Product>> {
    let id = parse_product_id(&key)?;
    let req: UpsertProductRequest = parse_json_body(&body)?;
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let product = Product::new(id, req.name, req.price);
    if let Some(evicted) = state.cache.put(id, product.clone()) {
        info!(product_id = id, evicted_id = evicted, "Cache full, evicted product");
    }

    Ok(Json(product))
}

/// Handler for POST /cache/invalidate
///
/// Drops the entry for the given product ID. Absent or non-positive IDs are
/// not an error; they simply match nothing.
pub async fn invalidate_handler(State(state): State<AppState>, body: Bytes) -> Result<String> {
    let req: InvalidationRequest = parse_json_body(&body)?;

    let removed = CacheKey::try_from(req.id).is_ok_and(|key| state.cache.invalidate(key));
    info!(product_id = req.id, removed, "Cache invalidated for product ID (via HTTP)");

    Ok(format!("Invalidated ID: {}", req.id))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
