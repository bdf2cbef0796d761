//! API Module
//!
//! HTTP handlers and routing for the product cache REST API.
//!
//! # Endpoints
//! - `GET /cache/:key` - Look up a cached product
//! - `PUT /cache/:key` - Populate or replace a cached product
//! - `POST /cache/invalidate` - Drop a product from the cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
