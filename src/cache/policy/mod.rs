//! Eviction Policies
//!
//! The bounded cache delegates victim selection to an [`Evictable`] strategy
//! object so LFU and ARC can be swapped without touching the store.

mod arc;
mod lfu;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use arc::ArcPolicy;
pub use lfu::LfuPolicy;

/// Key type tracked by every policy.
pub type CacheKey = u64;

// == Evictable Trait ==
/// Bookkeeping hooks the cache calls while holding its locks.
///
/// The cache guarantees that `on_insert` is only called for keys it does not
/// hold, and `on_access`/`on_remove` only for keys it does. Ticks come from
/// the cache's logical clock, so a larger tick means a more recent access.
/// A key returned by `eviction_candidate` is no longer tracked by the policy.
pub trait Evictable: Send + fmt::Debug {
    /// Short policy label used in logs and stats.
    fn name(&self) -> &'static str;

    /// A new key entered the cache at `tick`.
    fn on_insert(&mut self, key: CacheKey, tick: u64);

    /// An existing key was read or overwritten; `tick` is its latest access.
    fn on_access(&mut self, key: CacheKey, tick: u64);

    /// A key was removed by invalidation.
    fn on_remove(&mut self, key: CacheKey);

    /// Picks the victim that makes room for `incoming` and stops tracking it.
    ///
    /// `incoming` is not resident; it is passed so history-aware policies can
    /// adapt before choosing.
    fn eviction_candidate(&mut self, incoming: CacheKey) -> Option<CacheKey>;

    /// Number of resident keys tracked.
    fn resident_len(&self) -> usize;
}

// == Policy Kind ==
/// Selectable eviction strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyKind {
    /// Least-frequently-used, ties broken by least-recent access
    #[default]
    Lfu,
    /// Adaptive replacement cache
    Arc,
}

impl PolicyKind {
    /// Builds a boxed policy sized for `capacity` entries.
    pub fn build(self, capacity: usize) -> Box<dyn Evictable> {
        match self {
            PolicyKind::Lfu => Box::new(LfuPolicy::new(capacity)),
            PolicyKind::Arc => Box::new(ArcPolicy::new(capacity)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Lfu => "lfu",
            PolicyKind::Arc => "arc",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a policy name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown eviction policy: {0}")]
pub struct UnknownPolicy(pub String);

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lfu" => Ok(PolicyKind::Lfu),
            "arc" => Ok(PolicyKind::Arc),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}
