//! Cache entry freshness state.

use crate::store::Row;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// A cached query result with its insertion timestamp.
///
/// Entries move absent -> fresh -> stale -> absent. A stale entry may remain
/// physically present until swept or overwritten, but it is never served.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    pub(crate) rows: Arc<[Row]>,
    pub(crate) stored_at: Instant,
}

impl CacheEntry {
    pub(crate) fn new(rows: Arc<[Row]>) -> Self {
        Self { rows, stored_at: Instant::now() }
    }

    /// Fresh iff strictly less than `ttl` has elapsed since insertion.
    pub(crate) fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fresh_within_ttl() {
        let entry = CacheEntry::new(Vec::new().into());
        tokio::time::advance(Duration::from_millis(99)).await;
        assert!(entry.is_fresh(Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_at_exact_ttl() {
        let entry = CacheEntry::new(Vec::new().into());
        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(!entry.is_fresh(Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_past_ttl() {
        let entry = CacheEntry::new(Vec::new().into());
        tokio::time::advance(Duration::from_millis(150)).await;
        assert!(!entry.is_fresh(Duration::from_millis(100)));
    }
}
