//! Live database schema introspection
//!
//! Reads table and column names from `information_schema` so every
//! translation request carries the current schema. Introspection is
//! read-only and produces a fresh snapshot per call.

use crate::models::schema::{SchemaSnapshot, TableSchema};
use async_trait::async_trait;
use indexmap::IndexMap;
use sqlx::postgres::PgPool;
use sqlx::Row as _;

/// Errors from schema introspection.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema introspection failed: {0}")]
    Introspection(String),
}

/// Schema introspection seam.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Return the current public schema as an ordered table list.
    async fn load_public_schema(&self) -> Result<SchemaSnapshot, SchemaError>;
}

/// Postgres implementation over `information_schema.columns`.
pub struct PgSchemaProvider {
    pool: PgPool,
}

impl PgSchemaProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SCHEMA_QUERY: &str = "\
    SELECT table_name, column_name \
    FROM information_schema.columns \
    WHERE table_schema = 'public' \
    ORDER BY table_name, ordinal_position";

#[async_trait]
impl SchemaProvider for PgSchemaProvider {
    async fn load_public_schema(&self) -> Result<SchemaSnapshot, SchemaError> {
        let rows = sqlx::query(SCHEMA_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SchemaError::Introspection(e.to_string()))?;

        // Group columns per table, keeping first-seen table order and
        // ordinal column order (both come sorted from the query).
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for row in rows {
            let table: String = row
                .try_get("table_name")
                .map_err(|e| SchemaError::Introspection(e.to_string()))?;
            let column: String = row
                .try_get("column_name")
                .map_err(|e| SchemaError::Introspection(e.to_string()))?;
            grouped.entry(table).or_default().push(column);
        }

        let tables = grouped
            .into_iter()
            .map(|(name, columns)| TableSchema { name, columns })
            .collect();

        Ok(SchemaSnapshot::new(tables))
    }
}
