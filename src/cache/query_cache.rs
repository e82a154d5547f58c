//! Read-through query cache over a single store connection.

use super::entry::CacheEntry;
use super::key::derive_cache_key;
use crate::config::CacheConfig;
use crate::error::Error;
use crate::store::{Row, StoreDb, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    invalidations: AtomicU64,
}

/// Snapshot of cache counters.
///
/// `misses` equals the number of store round-trips made through the cache,
/// which is what tests assert on instead of mocking the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
}

/// Time-bounded, in-memory memoization layer in front of one [`StoreDb`].
///
/// On a miss, the cache runs the query itself, stores the rows with a
/// timestamp, and returns them; within the TTL window the stored rows are
/// served without touching the store. Rows are handed out as a shared
/// immutable `Arc<[Row]>`, so callers cannot corrupt cached results.
///
/// Known, accepted behavior (not bugs):
///
/// - **Staleness window**: writes to the underlying store perform no
///   invalidation, so cached reads of affected queries can lag by up to the
///   TTL. Use [`invalidate`](Self::invalidate) /
///   [`invalidate_prefix`](Self::invalidate_prefix) where that matters.
/// - **No single-flight**: two callers racing on the same cold key may both
///   query the store; whichever insert lands last wins. Both results are
///   equivalent, so the values converge.
/// - **Unbounded entry count**: eviction is purely time-based. The expected
///   workload is tens of queries per minute; a size bound would be a
///   behavior change, not a fix.
///
/// The handle is cheap to clone; all clones share one entry map, one store
/// connection, and one set of counters.
#[derive(Clone, Debug)]
pub struct QueryCache {
    db: StoreDb,
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
    counters: Arc<Counters>,
}

impl QueryCache {
    /// Create a cache in front of `db` using the configured TTL.
    pub fn new(db: StoreDb, config: &CacheConfig) -> Self {
        Self::with_ttl(db, config.ttl())
    }

    /// Create a cache with an explicit TTL.
    pub fn with_ttl(db: StoreDb, ttl: Duration) -> Self {
        Self {
            db,
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            counters: Arc::new(Counters::default()),
        }
    }

    /// The underlying store handle, for collaborators that write directly.
    pub fn db(&self) -> &StoreDb {
        &self.db
    }

    /// Run a read query through the cache.
    ///
    /// The effective key is `cache_key` if given, otherwise derived from
    /// `sql` and `params`. A fresh entry short-circuits the store; anything
    /// else delegates to [`StoreDb::all`] and stores the result.
    ///
    /// # Errors
    ///
    /// Store failures propagate unchanged and are never cached: the next
    /// call with the same key retries the store.
    pub async fn cached_query(
        &self, sql: &str, params: &[Value], cache_key: Option<&str>,
    ) -> Result<Arc<[Row]>, Error> {
        let key = match cache_key {
            Some(k) => k.to_owned(),
            None => derive_cache_key(sql, params),
        };

        if let Some(rows) = self.lookup(&key) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key = %key, rows = rows.len(), "cache hit");
            return Ok(rows);
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        let rows: Arc<[Row]> = self.db.all(sql, params.to_vec()).await?.into();
        tracing::debug!(key = %key, rows = rows.len(), "cache miss");
        self.insert(key, rows.clone());
        Ok(rows)
    }

    /// Return the rows for `key` if the entry exists and is fresh.
    ///
    /// Stale-but-present entries are treated as misses; they are overwritten
    /// by the subsequent insert or removed by the sweeper.
    fn lookup(&self, key: &str) -> Option<Arc<[Row]>> {
        let map = match self.entries.read() {
            Ok(map) => map,
            Err(_) => {
                tracing::warn!("cache map unavailable; treating read as miss");
                return None;
            }
        };
        let entry = map.get(key)?;
        entry.is_fresh(self.ttl).then(|| entry.rows.clone())
    }

    /// Insert or overwrite an entry.
    ///
    /// A poisoned map degrades to pass-through rather than failing the read:
    /// the rows were already fetched, so the caller still gets them.
    fn insert(&self, key: String, rows: Arc<[Row]>) {
        match self.entries.write() {
            Ok(mut map) => {
                map.insert(key, CacheEntry::new(rows));
            }
            Err(_) => tracing::warn!("cache map unavailable; serving uncached result"),
        }
    }

    /// Remove every entry whose age is at least the TTL.
    ///
    /// Fresh entries are left untouched regardless of how long ago they were
    /// last read: expiration is purely time-based, not LRU. Returns the
    /// number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let Ok(mut map) = self.entries.write() else {
            tracing::warn!("cache map unavailable; skipping sweep");
            return 0;
        };
        let before = map.len();
        map.retain(|_, entry| entry.is_fresh(self.ttl));
        let removed = before - map.len();
        if removed > 0 {
            self.counters.evictions.fetch_add(removed as u64, Ordering::Relaxed);
        }
        removed
    }

    /// Drop one entry, fresh or stale. Returns whether it was present.
    pub fn invalidate(&self, key: &str) -> bool {
        let Ok(mut map) = self.entries.write() else {
            return false;
        };
        let removed = map.remove(key).is_some();
        if removed {
            self.counters.invalidations.fetch_add(1, Ordering::Relaxed);
        }
        removed
    }

    /// Drop every entry whose key starts with `prefix`.
    ///
    /// Works on explicit key namespaces (e.g. `analytics_summary_`) and,
    /// because derived keys begin with the query text, on query-text
    /// prefixes too. Returns the number of entries removed.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let Ok(mut map) = self.entries.write() else {
            return 0;
        };
        let before = map.len();
        map.retain(|key, _| !key.starts_with(prefix));
        let removed = before - map.len();
        if removed > 0 {
            self.counters.invalidations.fetch_add(removed as u64, Ordering::Relaxed);
        }
        removed
    }

    /// Drop all entries.
    pub fn clear(&self) {
        if let Ok(mut map) = self.entries.write() {
            map.clear();
        }
    }

    /// Number of physically present entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current counter values.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
            invalidations: self.counters.invalidations.load(Ordering::Relaxed),
        }
    }
}
