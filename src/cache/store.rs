//! Bounded Cache Module
//!
//! Main cache engine combining HashMap storage with a pluggable eviction policy.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_queue::SegQueue;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheKey, CacheStats, Evictable, PolicyKind};

// == Bounded Cache ==
/// Fixed-capacity key-value store, safe to share across threads.
///
/// Lookups take only the shared map lock and never wait on the policy: a hit
/// is recorded in the entry's atomics and queued in a lock-free read buffer.
/// The buffer is replayed into the policy opportunistically by readers that
/// win `try_lock`, and always before any write touches the policy. Inserts
/// and invalidations take the exclusive map lock; the policy mutex is always
/// acquired after the map lock.
#[derive(Debug)]
pub struct BoundedCache<V> {
    /// Key-value storage
    entries: RwLock<HashMap<CacheKey, CacheEntry<V>>>,
    /// Eviction strategy bookkeeping
    policy: Mutex<Box<dyn Evictable>>,
    /// Hits not yet replayed into the policy
    read_buffer: SegQueue<CacheKey>,
    /// Performance statistics
    stats: StatsCounters,
    /// Logical clock for recency markers
    clock: AtomicU64,
    /// Maximum number of entries allowed
    capacity: usize,
    policy_name: &'static str,
}

impl<V: Clone> BoundedCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries, evicting per `kind`.
    pub fn new(capacity: usize, kind: PolicyKind) -> Self {
        Self::with_policy(capacity, kind.build(capacity))
    }

    /// Creates a cache around a caller-supplied policy.
    pub fn with_policy(capacity: usize, policy: Box<dyn Evictable>) -> Self {
        let policy_name = policy.name();
        Self {
            entries: RwLock::new(HashMap::with_capacity(capacity)),
            policy: Mutex::new(policy),
            read_buffer: SegQueue::new(),
            stats: StatsCounters::default(),
            clock: AtomicU64::new(0),
            capacity,
            policy_name,
        }
    }

    fn next_tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    // == Drain Reads ==
    /// Replays buffered hits into the policy.
    ///
    /// Callers hold the map lock (shared or exclusive) and the policy lock,
    /// so every buffered key is still resident. The entry's recency tick is
    /// the source of truth for when it was last read.
    fn drain_reads(
        &self,
        entries: &HashMap<CacheKey, CacheEntry<V>>,
        policy: &mut dyn Evictable,
    ) {
        while let Some(key) = self.read_buffer.pop() {
            if let Some(entry) = entries.get(&key) {
                policy.on_access(key, entry.last_access());
            }
        }
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// A hit bumps the entry's frequency and recency; a miss leaves the
    /// cache untouched.
    pub fn get(&self, key: CacheKey) -> Option<V> {
        let entries = self.entries.read();
        let Some(entry) = entries.get(&key) else {
            self.stats.record_miss();
            return None;
        };

        entry.record_access(self.next_tick());
        self.read_buffer.push(key);
        if let Some(mut policy) = self.policy.try_lock() {
            self.drain_reads(&entries, policy.as_mut());
        }
        self.stats.record_hit();
        Some(entry.value().clone())
    }

    // == Put ==
    /// Inserts or replaces the value stored under `key`.
    ///
    /// When a new key arrives at a full cache, one entry is evicted first.
    /// Returns the evicted key, if any.
    pub fn put(&self, key: CacheKey, value: V) -> Option<CacheKey> {
        if self.capacity == 0 {
            return None;
        }

        let mut entries = self.entries.write();
        let mut policy = self.policy.lock();
        self.drain_reads(&entries, policy.as_mut());
        debug_assert_eq!(policy.resident_len(), entries.len());

        let tick = self.next_tick();
        if let Some(entry) = entries.get_mut(&key) {
            entry.replace(value, tick);
            policy.on_access(key, tick);
            return None;
        }

        let mut evicted = None;
        if entries.len() >= self.capacity {
            while let Some(victim) = policy.eviction_candidate(key) {
                if entries.remove(&victim).is_some() {
                    evicted = Some(victim);
                    break;
                }
            }
            // Policy ran dry while full: drop an arbitrary entry to hold the bound
            if evicted.is_none() {
                if let Some(&victim) = entries.keys().next() {
                    entries.remove(&victim);
                    policy.on_remove(victim);
                    evicted = Some(victim);
                }
            }
            if let Some(victim) = evicted {
                self.stats.record_eviction();
                debug!(key = victim, policy = self.policy_name, "Evicted cache entry");
            }
        }

        entries.insert(key, CacheEntry::new(value, tick));
        policy.on_insert(key, tick);
        evicted
    }

    // == Invalidate ==
    /// Removes `key` if present and reports whether anything was removed.
    pub fn invalidate(&self, key: CacheKey) -> bool {
        let mut entries = self.entries.write();
        let mut policy = self.policy.lock();
        self.drain_reads(&entries, policy.as_mut());

        if entries.remove(&key).is_none() {
            return false;
        }
        policy.on_remove(key);
        self.stats.record_invalidation();
        true
    }

    /// Access count of `key` without registering an access.
    pub fn frequency(&self, key: CacheKey) -> Option<u64> {
        self.entries.read().get(&key).map(CacheEntry::frequency)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
            .snapshot(self.len(), self.capacity, self.policy_name)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy_name
    }
}
