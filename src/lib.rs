//! qcache: a read-through TTL query cache over a single SQLite connection.
//!
//! Route handlers and other read-heavy collaborators call
//! [`QueryCache::cached_query`] instead of hitting the store directly; the
//! cache serves repeat queries from memory for up to the configured TTL and
//! otherwise delegates to the store and remembers the result. The cache is a
//! best-effort accelerator, not a source of truth: it is purely in-memory
//! and lost on restart.
//!
//! Three behaviors are deliberate and worth knowing before depending on it:
//!
//! - **Staleness window**: nothing invalidates an entry when the underlying
//!   data changes. Writers and readers can disagree for up to the TTL. Where
//!   that is unacceptable, call [`QueryCache::invalidate`] or
//!   [`QueryCache::invalidate_prefix`] after writing.
//! - **No single-flight**: concurrent cold misses on one key may each query
//!   the store once; the results are equivalent and converge.
//! - **No size bound**: eviction is time-based only.
//!
//! ```no_run
//! use qcache::{CacheConfig, QueryCache, StoreDb, Value};
//!
//! # async fn example() -> Result<(), qcache::Error> {
//! let config = CacheConfig::default();
//! let db = StoreDb::open(&config.db_path).await?;
//! let cache = QueryCache::new(db, &config);
//! let sweeper = cache.spawn_sweeper(config.sweep_interval());
//!
//! let rows = cache
//!     .cached_query(
//!         "SELECT COUNT(*) AS count FROM analytics WHERE user_id = ?1",
//!         &[Value::Integer(42)],
//!         None,
//!     )
//!     .await?;
//! # drop(sweeper);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod store;

pub use cache::{CacheStats, QueryCache};
pub use config::{CacheConfig, ConfigError};
pub use error::Error;
pub use store::{Row, StoreDb, Value};
