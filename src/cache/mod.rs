//! In-memory read-through TTL cache in front of the SQLite store.
//!
//! This module provides the component the rest of the system consumes:
//!
//! - [`QueryCache::cached_query`]: the cached-read primitive, keyed by query
//!   text + parameters or an explicit caller-supplied key
//! - [`QueryCache::sweep_expired`] and [`QueryCache::spawn_sweeper`]:
//!   periodic eviction of expired entries
//! - [`QueryCache::invalidate`] / [`QueryCache::invalidate_prefix`]:
//!   explicit invalidation hooks (TTL expiry is the only automatic
//!   invalidation)

pub mod key;

mod entry;
mod query_cache;
mod sweeper;

pub use query_cache::{CacheStats, QueryCache};
