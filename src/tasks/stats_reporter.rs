//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::BoundedCache;

/// Spawns a background task that logs a stats snapshot every interval.
///
/// Returns `None` when `interval_secs` is 0, which disables reporting.
/// The returned handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(BoundedCache::<Product>::new(1000, PolicyKind::Lfu));
/// let reporter = spawn_stats_reporter(cache.clone(), 60);
/// // Later, during shutdown:
/// if let Some(handle) = reporter { handle.abort(); }
/// ```
pub fn spawn_stats_reporter<V>(
    cache: Arc<BoundedCache<V>>,
    interval_secs: u64,
) -> Option<JoinHandle<()>>
where
    V: Clone + Send + Sync + 'static,
{
    if interval_secs == 0 {
        return None;
    }
    let period = Duration::from_secs(interval_secs);

    Some(tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval_secs
        );

        let mut ticker = tokio::time::interval(period);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let stats = cache.stats();
            info!(
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                invalidations = stats.invalidations,
                entries = stats.total_entries,
                capacity = stats.capacity,
                policy = stats.policy,
                hit_rate = stats.hit_rate(),
                "Cache stats"
            );
        }
    }))
}
