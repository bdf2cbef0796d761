//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with access tracking.

use std::sync::atomic::{AtomicU64, Ordering};

// == Cache Entry ==
/// Represents a single cache entry with its value and access metadata.
///
/// Counters are atomic so readers holding only the shared map lock can
/// still record an access.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored value
    value: V,
    /// Number of reads and overwrites, starting at 1 on insert
    frequency: AtomicU64,
    /// Logical clock tick of the most recent access
    last_access: AtomicU64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the given logical tick.
    pub fn new(value: V, tick: u64) -> Self {
        Self {
            value,
            frequency: AtomicU64::new(1),
            last_access: AtomicU64::new(tick),
        }
    }

    /// Borrows the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    // == Record Access ==
    /// Bumps the frequency counter and moves the recency marker forward.
    ///
    /// Returns the new frequency.
    pub fn record_access(&self, tick: u64) -> u64 {
        self.last_access.fetch_max(tick, Ordering::Relaxed);
        self.frequency.fetch_add(1, Ordering::Relaxed) + 1
    }

    // == Replace ==
    /// Swaps in a new value; an overwrite counts as an access.
    pub fn replace(&mut self, value: V, tick: u64) -> V {
        self.record_access(tick);
        std::mem::replace(&mut self.value, value)
    }

    pub fn frequency(&self) -> u64 {
        self.frequency.load(Ordering::Relaxed)
    }

    pub fn last_access(&self) -> u64 {
        self.last_access.load(Ordering::Relaxed)
    }
}
