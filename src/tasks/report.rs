//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::MemoCache;

/// Spawns a background task that periodically logs cache statistics.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between reports. It only reads the cache, so frequencies and entries are
/// never affected by reporting.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval_secs` - Interval in seconds between reports
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(MemoCache::<u64>::new(64)?);
/// let reporter = spawn_stats_reporter(cache.clone(), 10);
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter<V>(cache: Arc<MemoCache<V>>, interval_secs: u64) -> JoinHandle<()>
where
    V: Send + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.stats();
            info!(
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                entries = stats.total_entries,
                max_limit = stats.max_limit,
                "cache stats: hit rate {:.2}",
                stats.hit_rate()
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheKey, CallArgs};

    #[tokio::test]
    async fn test_reporter_does_not_touch_frequencies() {
        let cache = Arc::new(MemoCache::<String>::new(4).unwrap());
        let args = CallArgs::new().arg(1);
        cache.call(&args, |_| "one".to_string()).unwrap();

        let handle = spawn_stats_reporter(cache.clone(), 1);

        // Let at least one report run
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let key = CacheKey::build(&args).unwrap();
        assert_eq!(cache.snapshot_frequencies()[&key], 1);
        assert_eq!(cache.stats().hits, 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_reporter_can_be_aborted() {
        let cache = Arc::new(MemoCache::<u64>::new(4).unwrap());

        let handle = spawn_stats_reporter(cache, 1);

        // Abort immediately
        handle.abort();

        // Wait a bit and verify task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
