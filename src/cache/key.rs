//! Cache key derivation from query text and bind parameters.

use crate::store::Value;

/// Derive the default cache key for a query and its parameters.
///
/// The key is the query text joined to the JSON encoding of the parameter
/// sequence with a unit separator, so distinct parameter lists (including
/// different orderings of the same values) produce distinct keys. Derived
/// keys stay human-readable, which lets [`invalidate_prefix`] target query
/// text as well as explicit key namespaces.
///
/// Callers may bypass derivation entirely by passing an explicit key to
/// [`cached_query`], deliberately aliasing several physically-different
/// queries to one cache slot (pre-aggregated summary views).
///
/// [`cached_query`]: crate::QueryCache::cached_query
/// [`invalidate_prefix`]: crate::QueryCache::invalidate_prefix
pub fn derive_cache_key(sql: &str, params: &[Value]) -> String {
    // Non-finite floats are the only values serde_json can refuse; fall
    // back to the Debug encoding, which is equally deterministic.
    let encoded = serde_json::to_string(params).unwrap_or_else(|_| format!("{params:?}"));
    format!("{sql}\u{1f}{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_stability() {
        let params = vec![Value::Integer(42)];
        let key1 = derive_cache_key("SELECT * FROM analytics WHERE user_id = ?1", &params);
        let key2 = derive_cache_key("SELECT * FROM analytics WHERE user_id = ?1", &params);
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_key_differs_by_params() {
        let sql = "SELECT * FROM analytics WHERE user_id = ?1";
        let key1 = derive_cache_key(sql, &[Value::Integer(42)]);
        let key2 = derive_cache_key(sql, &[Value::Integer(43)]);
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_key_differs_by_param_order() {
        let sql = "SELECT * FROM plays WHERE a = ?1 AND b = ?2";
        let key1 = derive_cache_key(sql, &[Value::Integer(1), Value::Integer(2)]);
        let key2 = derive_cache_key(sql, &[Value::Integer(2), Value::Integer(1)]);
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_key_differs_by_query_text() {
        let key1 = derive_cache_key("SELECT 1", &[]);
        let key2 = derive_cache_key("SELECT 2", &[]);
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_key_contains_query_text() {
        let key = derive_cache_key("SELECT COUNT(*) FROM analytics", &[]);
        assert!(key.starts_with("SELECT COUNT(*) FROM analytics"));
    }
}
