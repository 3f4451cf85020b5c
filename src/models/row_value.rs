//! Dynamically-typed result row values
//!
//! Query results carry heterogeneous column types decided at runtime by the
//! database driver. Rather than an open-ended dynamic type, values are a
//! closed tagged union over the wire-representable scalar kinds, with a
//! string fallback for anything the driver cannot map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One result row: column name to value, in result-set column order.
pub type Row = IndexMap<String, RowValue>;

/// A single scalar cell value.
///
/// Serialized untagged so JSON shows natural scalars
/// (`{"id": 1, "name": "Alice", "active": true}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowValue::Null => write!(f, "null"),
            RowValue::Bool(b) => write!(f, "{}", b),
            RowValue::Int(i) => write!(f, "{}", i),
            RowValue::Float(x) => write!(f, "{}", x),
            RowValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for RowValue {
    fn from(s: &str) -> Self {
        RowValue::Text(s.to_string())
    }
}

impl From<i64> for RowValue {
    fn from(i: i64) -> Self {
        RowValue::Int(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serialization() {
        let mut row = Row::new();
        row.insert("id".to_string(), RowValue::Int(1));
        row.insert("name".to_string(), RowValue::Text("Alice".to_string()));
        row.insert("active".to_string(), RowValue::Bool(true));
        row.insert("score".to_string(), RowValue::Float(4.5));
        row.insert("deleted_at".to_string(), RowValue::Null);

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"Alice","active":true,"score":4.5,"deleted_at":null}"#
        );
    }

    #[test]
    fn test_row_preserves_column_order() {
        let mut row = Row::new();
        row.insert("z".to_string(), RowValue::Int(1));
        row.insert("a".to_string(), RowValue::Int(2));
        let keys: Vec<&String> = row.keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_deserialization_round_trip() {
        let json = r#"{"id":42,"label":"x","ok":false,"nil":null}"#;
        let row: Row = serde_json::from_str(json).unwrap();
        assert_eq!(row["id"], RowValue::Int(42));
        assert_eq!(row["label"], RowValue::Text("x".to_string()));
        assert_eq!(row["ok"], RowValue::Bool(false));
        assert_eq!(row["nil"], RowValue::Null);
    }
}
