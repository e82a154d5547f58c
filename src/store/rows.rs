//! Typed scalar values and result rows.
//!
//! The cache treats result schemas as opaque: a [`Row`] is just a mapping of
//! column name to scalar [`Value`]. The same [`Value`] type doubles as a bind
//! parameter, so callers pass and receive one representation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio_rusqlite::rusqlite::{
    self, ToSql,
    types::{ToSqlOutput, Value as SqlValue, ValueRef},
};

/// A single result row: column name to scalar value.
///
/// Column schemas are owned by the underlying store, not by the cache.
pub type Row = BTreeMap<String, Value>;

/// A scalar SQLite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(v: ValueRef<'_>) -> Self {
        match v {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Value::Real(r) => ToSqlOutput::Owned(SqlValue::Real(*r)),
            Value::Text(t) => ToSqlOutput::Borrowed(ValueRef::Text(t.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_ref() {
        assert_eq!(Value::from(ValueRef::Null), Value::Null);
        assert_eq!(Value::from(ValueRef::Integer(7)), Value::Integer(7));
        assert_eq!(Value::from(ValueRef::Real(1.5)), Value::Real(1.5));
        assert_eq!(Value::from(ValueRef::Text(b"abc")), Value::Text("abc".into()));
        assert_eq!(Value::from(ValueRef::Blob(&[1, 2])), Value::Blob(vec![1, 2]));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Integer(42).as_i64(), Some(42));
        assert_eq!(Value::Integer(42).as_f64(), Some(42.0));
        assert_eq!(Value::Real(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Text("x".into()).as_str(), Some("x"));
        assert_eq!(Value::Null.as_i64(), None);
        assert_eq!(Value::Null.as_str(), None);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(3_i64), Value::Integer(3));
        assert_eq!(Value::from(0.5), Value::Real(0.5));
        assert_eq!(Value::from("hi"), Value::Text("hi".into()));
        assert_eq!(Value::from(String::from("hi")), Value::Text("hi".into()));
    }
}
