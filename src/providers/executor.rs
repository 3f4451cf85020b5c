//! SELECT execution against Postgres
//!
//! Only ever receives SQL that already passed the safety guard, but can
//! still fail at the database level (unknown column, type mismatch) and must
//! surface a descriptive message. Result cells are decoded into the closed
//! `RowValue` union with a string fallback for types the mapping does not
//! cover.

use crate::models::row_value::{Row, RowValue};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

/// Errors from query execution. The message is the database driver's own
/// description, surfaced verbatim to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("{0}")]
    Query(String),
}

/// SELECT execution seam.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute_select(&self, sql: &str) -> Result<Vec<Row>, ExecutorError>;
}

/// Postgres implementation. Results are never cached.
pub struct PgQueryExecutor {
    pool: PgPool,
}

impl PgQueryExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryExecutor for PgQueryExecutor {
    async fn execute_select(&self, sql: &str) -> Result<Vec<Row>, ExecutorError> {
        let pg_rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ExecutorError::Query(e.to_string()))?;

        Ok(pg_rows.iter().map(decode_row).collect())
    }
}

fn decode_row(row: &PgRow) -> Row {
    let mut out = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        out.insert(column.name().to_string(), decode_cell(row, idx));
    }
    out
}

/// Decode one cell by its Postgres type name. Unknown types fall back to a
/// textual rendering rather than failing the whole result.
fn decode_cell(row: &PgRow, idx: usize) -> RowValue {
    if let Ok(raw) = row.try_get_raw(idx) {
        if raw.is_null() {
            return RowValue::Null;
        }
    }

    let type_name = row.columns()[idx].type_info().name().to_uppercase();
    match type_name.as_str() {
        "BOOL" => row
            .try_get::<bool, _>(idx)
            .map(RowValue::Bool)
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "INT2" => row
            .try_get::<i16, _>(idx)
            .map(|v| RowValue::Int(v as i64))
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "INT4" => row
            .try_get::<i32, _>(idx)
            .map(|v| RowValue::Int(v as i64))
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "INT8" => row
            .try_get::<i64, _>(idx)
            .map(RowValue::Int)
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "FLOAT4" => row
            .try_get::<f32, _>(idx)
            .map(|v| RowValue::Float(v as f64))
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "FLOAT8" => row
            .try_get::<f64, _>(idx)
            .map(RowValue::Float)
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => row
            .try_get::<String, _>(idx)
            .map(RowValue::Text)
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "DATE" => row
            .try_get::<chrono::NaiveDate, _>(idx)
            .map(|v| RowValue::Text(v.to_string()))
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "TIMESTAMP" => row
            .try_get::<chrono::NaiveDateTime, _>(idx)
            .map(|v| RowValue::Text(v.to_string()))
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "TIMESTAMPTZ" => row
            .try_get::<chrono::DateTime<chrono::Utc>, _>(idx)
            .map(|v| RowValue::Text(v.to_rfc3339()))
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        "JSON" | "JSONB" => row
            .try_get::<serde_json::Value, _>(idx)
            .map(|v| RowValue::Text(v.to_string()))
            .unwrap_or_else(|_| text_fallback(row, idx, &type_name)),
        _ => text_fallback(row, idx, &type_name),
    }
}

/// Last resort: try a string decode, else render an opaque marker so the
/// column is still visible in results and previews.
fn text_fallback(row: &PgRow, idx: usize, type_name: &str) -> RowValue {
    row.try_get::<String, _>(idx)
        .map(RowValue::Text)
        .unwrap_or_else(|_| RowValue::Text(format!("<{}>", type_name.to_lowercase())))
}
