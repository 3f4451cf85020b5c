//! Response model for the NL2SQL endpoints
//!
//! The body always carries whatever SQL was produced — even when the guard
//! rejected it or execution failed — so UIs can show "we generated this,
//! but...". `rows` is empty on the generate-only endpoint and on every
//! failure path.

use crate::models::row_value::Row;
use serde::{Deserialize, Serialize};

/// Response payload for SQL generation and execution.
///
/// # Example (success on /ask)
/// ```json
/// {
///   "sql": "SELECT id, name FROM users\nLIMIT 100;",
///   "rows": [{"id": 1, "name": "Alice"}]
/// }
/// ```
///
/// # Example (guard rejection)
/// ```json
/// {
///   "sql": "DELETE FROM users",
///   "rows": [],
///   "error": "Forbidden keyword detected: delete"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nl2SqlResponse {
    /// The generated SQL, or empty when none was ever produced.
    pub sql: String,

    /// Result rows. Empty unless execution succeeded.
    #[serde(default)]
    pub rows: Vec<Row>,

    /// Error message, absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Nl2SqlResponse {
    /// Successful generation: SQL only, no rows.
    pub fn sql_only(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            rows: Vec::new(),
            error: None,
        }
    }

    /// Successful execution: SQL plus the rows it returned.
    pub fn with_rows(sql: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            sql: sql.into(),
            rows,
            error: None,
        }
    }

    /// Failure carrying whatever SQL was produced so far.
    pub fn error(sql: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            rows: Vec::new(),
            error: Some(message.into()),
        }
    }
}
