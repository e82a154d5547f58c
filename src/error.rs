//! Unified error types for qcache.
//!
//! The cache only adds value on the success path: store failures pass
//! through to the caller verbatim and are never memoized.

use tokio_rusqlite::rusqlite;

/// Unified error type for cache and store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Backing store operation failed. Propagated to the caller; the result
    /// is never cached, so a subsequent call retries the store.
    #[error("store query failed: {0}")]
    Database(tokio_rusqlite::Error),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Database(tokio_rusqlite::Error::ConnectionClosed);
        assert!(err.to_string().contains("store query failed"));
    }

    #[test]
    fn test_rusqlite_error_wraps_as_database() {
        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, Error::Database(_)));
    }
}
