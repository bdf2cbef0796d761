//! LFU Policy
//!
//! Least Frequently Used eviction backed by a lazy min-heap.
//!
//! Every frequency or recency change pushes a fresh `(frequency, tick, key)`
//! triple onto the heap; superseded triples stay behind and are discarded
//! when they surface. The heap is rebuilt from the authoritative map once it
//! grows past [`MAX_HEAP_FACTOR`] times the live key count.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::{CacheKey, Evictable};

/// Heap size multiple (relative to live keys) that triggers a rebuild.
const MAX_HEAP_FACTOR: usize = 4;

/// Per-key bookkeeping: access count and tick of the last access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Usage {
    frequency: u64,
    tick: u64,
}

// == LFU Policy ==
#[derive(Debug, Default)]
pub struct LfuPolicy {
    usage: HashMap<CacheKey, Usage>,
    // Min-heap ordered by (frequency, tick); lower tick means older access.
    heap: BinaryHeap<Reverse<(u64, u64, CacheKey)>>,
}

impl LfuPolicy {
    pub fn new(capacity: usize) -> Self {
        Self {
            usage: HashMap::with_capacity(capacity),
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Current access count of a tracked key.
    pub fn frequency(&self, key: CacheKey) -> Option<u64> {
        self.usage.get(&key).map(|u| u.frequency)
    }

    fn push(&mut self, key: CacheKey, usage: Usage) {
        self.heap.push(Reverse((usage.frequency, usage.tick, key)));
        self.maybe_rebuild_heap();
    }

    fn maybe_rebuild_heap(&mut self) {
        let max_heap_len = self.usage.len().max(1).saturating_mul(MAX_HEAP_FACTOR);
        if self.heap.len() <= max_heap_len {
            return;
        }

        self.heap.clear();
        for (&key, usage) in &self.usage {
            self.heap.push(Reverse((usage.frequency, usage.tick, key)));
        }
    }
}

impl Evictable for LfuPolicy {
    fn name(&self) -> &'static str {
        "lfu"
    }

    fn on_insert(&mut self, key: CacheKey, tick: u64) {
        let usage = Usage { frequency: 1, tick };
        self.usage.insert(key, usage);
        self.push(key, usage);
    }

    fn on_access(&mut self, key: CacheKey, tick: u64) {
        let Some(usage) = self.usage.get_mut(&key) else {
            return;
        };
        usage.frequency = usage.frequency.saturating_add(1);
        usage.tick = usage.tick.max(tick);
        let usage = *usage;
        self.push(key, usage);
    }

    fn on_remove(&mut self, key: CacheKey) {
        if self.usage.remove(&key).is_some() {
            self.maybe_rebuild_heap();
        }
    }

    fn eviction_candidate(&mut self, _incoming: CacheKey) -> Option<CacheKey> {
        while let Some(Reverse((frequency, tick, key))) = self.heap.pop() {
            // Only the triple matching the live usage is authoritative
            if self.usage.get(&key) == Some(&Usage { frequency, tick }) {
                self.usage.remove(&key);
                return Some(key);
            }
        }
        None
    }

    fn resident_len(&self) -> usize {
        self.usage.len()
    }
}
