//! Cache Module
//!
//! Provides a bounded in-memory cache with pluggable LFU/ARC eviction.

mod entry;
mod policy;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use policy::{ArcPolicy, CacheKey, Evictable, LfuPolicy, PolicyKind, UnknownPolicy};
pub use stats::CacheStats;
pub use store::BoundedCache;
