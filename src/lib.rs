//! Product Cache - A bounded in-memory product cache server
//!
//! Serves cached products over HTTP with LFU/ARC eviction and request-driven
//! invalidation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedCache, PolicyKind};
pub use config::Config;
pub use tasks::spawn_stats_reporter;
