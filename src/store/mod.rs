//! Backing store connection management with pragma configuration.
//!
//! This module owns the single SQLite connection the cache sits in front of.
//! Operations run on tokio-rusqlite's background thread, which serializes
//! store access the same way the original single-connection data path did.
//! Timeout and cancellation policy for in-flight queries belongs here, not
//! to the cache layer above.

pub mod rows;

use crate::error::Error;
use std::path::Path;
use tokio_rusqlite::Connection;
use tokio_rusqlite::rusqlite;

pub use rows::{Row, Value};

/// Pragmas applied to every connection on open.
const PRAGMAS: &str = "PRAGMA journal_mode=WAL;
 PRAGMA synchronous=NORMAL;
 PRAGMA temp_store=MEMORY;
 PRAGMA foreign_keys=ON;";

/// Handle to the backing SQLite store.
///
/// Wraps a tokio-rusqlite Connection that runs database operations on a
/// background thread. Cheap to clone; all clones share one connection.
#[derive(Clone, Debug)]
pub struct StoreDb {
    pub(crate) conn: Connection,
}

impl StoreDb {
    /// Open a database at the specified path.
    ///
    /// Creates the file if it doesn't exist and applies performance pragmas.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let conn = Connection::open(path).await.map_err(|e| Error::Database(e.into()))?;
        Self::configure(&conn).await?;
        Ok(Self { conn })
    }

    /// Open an in-memory database for testing.
    ///
    /// Same pragma configuration as file-based databases.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| Error::Database(e.into()))?;
        Self::configure(&conn).await?;
        Ok(Self { conn })
    }

    async fn configure(conn: &Connection) -> Result<(), Error> {
        conn.call(|conn| {
            conn.execute_batch(PRAGMAS)?;
            Ok(())
        })
        .await
        .map_err(Error::Database)
    }

    /// Run a read query and collect every result row.
    ///
    /// This is the primitive the cache delegates to on a miss. Bind values
    /// are positional (`?1`, `?2`, ...).
    pub async fn all(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, Error> {
        let sql = sql.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<Row>, Error> {
                let mut stmt = conn.prepare(&sql)?;
                let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

                let mut rows = Vec::new();
                let mut result = stmt.query(rusqlite::params_from_iter(params.iter()))?;
                while let Some(row) = result.next()? {
                    let mut out = Row::new();
                    for (i, name) in columns.iter().enumerate() {
                        out.insert(name.clone(), Value::from(row.get_ref(i)?));
                    }
                    rows.push(out);
                }
                Ok(rows)
            })
            .await
            .map_err(Error::from)
    }

    /// Execute a write statement, returning the number of affected rows.
    ///
    /// Writes perform no cache invalidation: cached reads of affected
    /// queries stay stale until their TTL expires.
    pub async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<usize, Error> {
        let sql = sql.to_string();
        self.conn
            .call(move |conn| -> Result<usize, Error> {
                let affected = conn.execute(&sql, rusqlite::params_from_iter(params.iter()))?;
                Ok(affected)
            })
            .await
            .map_err(Error::from)
    }

    /// Run SQLite's query-planner maintenance (`PRAGMA optimize`).
    ///
    /// Intended for periodic low-traffic moments, alongside cache sweeps.
    pub async fn optimize(&self) -> Result<(), Error> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA optimize;")?;
                Ok(())
            })
            .await
            .map_err(Error::Database)
    }
}
