//! Periodic background eviction of expired entries.

use super::query_cache::QueryCache;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

impl QueryCache {
    /// Spawn a background task that sweeps expired entries on a fixed
    /// interval.
    ///
    /// The sweeper is optional: stale entries are already treated as misses
    /// on read, so stopping the task (drop or abort the handle) only means
    /// stale entries linger in memory until overwritten.
    pub fn spawn_sweeper(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the first
            // sweep happens one full interval after spawn.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = cache.sweep_expired();
                if removed > 0 {
                    tracing::debug!(removed, remaining = cache.len(), "swept expired cache entries");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreDb, Value};

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_expired_entries() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.execute("CREATE TABLE t (x INTEGER)", vec![]).await.unwrap();
        db.execute("INSERT INTO t (x) VALUES (?1)", vec![Value::Integer(1)])
            .await
            .unwrap();

        let cache = QueryCache::with_ttl(db, Duration::from_millis(100));
        cache.cached_query("SELECT x FROM t", &[], None).await.unwrap();
        assert_eq!(cache.len(), 1);

        let handle = cache.spawn_sweeper(Duration::from_millis(200));

        tokio::time::sleep(Duration::from_millis(450)).await;
        tokio::task::yield_now().await;

        assert!(cache.is_empty());
        assert_eq!(cache.stats().evictions, 1);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_leaves_fresh_entries() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.execute("CREATE TABLE t (x INTEGER)", vec![]).await.unwrap();

        let cache = QueryCache::with_ttl(db, Duration::from_secs(60));
        cache.cached_query("SELECT x FROM t", &[], None).await.unwrap();

        let handle = cache.spawn_sweeper(Duration::from_millis(200));
        tokio::time::sleep(Duration::from_millis(450)).await;
        tokio::task::yield_now().await;

        assert_eq!(cache.len(), 1);
        handle.abort();
    }
}
