//! ARC Policy
//!
//! Adaptive Replacement Cache bookkeeping over four recency lists:
//!
//! - `T1`: resident keys seen once recently
//! - `T2`: resident keys seen at least twice
//! - `B1`/`B2`: ghost keys recently evicted from `T1`/`T2` (no values)
//!
//! `p` is the adaptive target size for `T1`. Re-inserting a key that sits in
//! `B1` grows `p` (favor recency); one in `B2` shrinks it (favor frequency).
//! Ghost hits go straight into `T2`.

use std::collections::{BTreeMap, HashMap};

use super::{CacheKey, Evictable};

// == Recency List ==
/// Ordered set of keys, least recently used first.
#[derive(Debug, Default)]
struct RecencyList {
    positions: HashMap<CacheKey, u64>,
    order: BTreeMap<u64, CacheKey>,
    next_seq: u64,
}

impl RecencyList {
    /// Moves `key` to the most recently used position.
    fn push_mru(&mut self, key: CacheKey) {
        self.remove(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.positions.insert(key, seq);
        self.order.insert(seq, key);
    }

    fn remove(&mut self, key: CacheKey) -> bool {
        match self.positions.remove(&key) {
            Some(seq) => {
                self.order.remove(&seq);
                true
            }
            None => false,
        }
    }

    fn pop_lru(&mut self) -> Option<CacheKey> {
        let (_, key) = self.order.pop_first()?;
        self.positions.remove(&key);
        Some(key)
    }

    fn contains(&self, key: CacheKey) -> bool {
        self.positions.contains_key(&key)
    }

    fn len(&self) -> usize {
        self.positions.len()
    }

    fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

// == ARC Policy ==
#[derive(Debug)]
pub struct ArcPolicy {
    capacity: usize,
    /// Target size for T1
    p: usize,
    t1: RecencyList,
    t2: RecencyList,
    b1: RecencyList,
    b2: RecencyList,
    /// Ghost key already adapted for by `eviction_candidate`, awaiting insert
    promoted: Option<CacheKey>,
}

impl ArcPolicy {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            p: capacity / 2,
            t1: RecencyList::default(),
            t2: RecencyList::default(),
            b1: RecencyList::default(),
            b2: RecencyList::default(),
            promoted: None,
        }
    }

    /// Current adaptive target for T1.
    pub fn target_recent(&self) -> usize {
        self.p
    }

    pub fn recent_len(&self) -> usize {
        self.t1.len()
    }

    pub fn frequent_len(&self) -> usize {
        self.t2.len()
    }

    pub fn ghost_len(&self) -> usize {
        self.b1.len() + self.b2.len()
    }

    // == Adapt ==
    /// Adjusts `p` if `key` is a ghost and consumes the ghost.
    ///
    /// Returns true when the key came from B2.
    fn adapt(&mut self, key: CacheKey) -> bool {
        if self.b1.contains(key) {
            let delta = if self.b2.len() > self.b1.len() {
                self.b2.len().div_ceil(self.b1.len())
            } else {
                1
            };
            self.p = (self.p + delta).min(self.capacity);
            self.b1.remove(key);
            self.promoted = Some(key);
            false
        } else if self.b2.contains(key) {
            let delta = if self.b1.len() > self.b2.len() {
                self.b1.len().div_ceil(self.b2.len())
            } else {
                1
            };
            self.p = self.p.saturating_sub(delta);
            self.b2.remove(key);
            self.promoted = Some(key);
            true
        } else {
            false
        }
    }

    /// Keeps each ghost list within the cache capacity.
    fn trim_ghosts(&mut self) {
        while self.b1.len() > self.capacity {
            self.b1.pop_lru();
        }
        while self.b2.len() > self.capacity {
            self.b2.pop_lru();
        }
    }
}

impl Evictable for ArcPolicy {
    fn name(&self) -> &'static str {
        "arc"
    }

    fn on_insert(&mut self, key: CacheKey, _tick: u64) {
        if self.promoted == Some(key) {
            self.promoted = None;
            self.t2.push_mru(key);
        } else if self.b1.contains(key) || self.b2.contains(key) {
            // Ghost hit with room to spare: adapt now, no victim needed
            self.adapt(key);
            self.promoted = None;
            self.t2.push_mru(key);
        } else {
            self.t1.push_mru(key);
        }
    }

    fn on_access(&mut self, key: CacheKey, _tick: u64) {
        if self.t1.remove(key) || self.t2.contains(key) {
            self.t2.push_mru(key);
        }
    }

    fn on_remove(&mut self, key: CacheKey) {
        // Invalidation is not a replacement decision, so no ghost is kept.
        if !self.t1.remove(key) {
            self.t2.remove(key);
        }
    }

    // == Replace ==
    fn eviction_candidate(&mut self, incoming: CacheKey) -> Option<CacheKey> {
        let in_b2 = self.adapt(incoming);

        let t1_len = self.t1.len();
        let from_recent = if t1_len > 0 && (t1_len > self.p || (t1_len == self.p && in_b2)) {
            true
        } else if !self.t2.is_empty() {
            false
        } else {
            t1_len > 0
        };

        let victim = if from_recent {
            let key = self.t1.pop_lru()?;
            self.b1.push_mru(key);
            key
        } else {
            let key = self.t2.pop_lru()?;
            self.b2.push_mru(key);
            key
        };

        self.trim_ghosts();
        Some(victim)
    }

    fn resident_len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }
}
