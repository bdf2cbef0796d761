//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{demo_catalog, Product};
pub use requests::{InvalidationRequest, UpsertProductRequest};
pub use responses::{HealthResponse, StatsResponse};
