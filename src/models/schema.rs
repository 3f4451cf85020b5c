//! Database schema snapshot models
//!
//! A snapshot is produced fresh per request by the schema provider and
//! attached to translation requests so the AI service can see table and
//! column names. It carries no identity beyond its content and is never
//! persisted.

use serde::{Deserialize, Serialize};

/// One table with its column names in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<String>,
}

/// The full public schema: an ordered list of tables.
///
/// Table names are unique within one snapshot (the provider groups
/// information_schema rows by table).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub tables: Vec<TableSchema>,
}

impl SchemaSnapshot {
    pub fn new(tables: Vec<TableSchema>) -> Self {
        Self { tables }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
