//! Per-session conversational memory
//!
//! Each session keeps the outcome of its most recent pipeline run (question,
//! SQL, error, a bounded preview of result rows). The store projects that
//! state into the context map handed to the AI translator so it can resolve
//! follow-up questions ("and only the active ones?").
//!
//! The store itself never evicts: session lifetime equals process lifetime.
//! That mirrors the reference behavior deliberately; a TTL or LRU bound
//! belongs at this boundary if one is ever added, not inside the record
//! contract.

use crate::models::row_value::Row;
use dashmap::DashMap;
use indexmap::IndexMap;

/// Number of sample rows kept in a result preview.
const PREVIEW_ROW_CAP: usize = 3;

/// Conversational state for one session. All fields reflect only the most
/// recent pipeline run; they are overwritten as a unit, never appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMemory {
    pub last_question: Option<String>,
    pub last_sql: Option<String>,
    pub last_error: Option<String>,
    pub last_rows_preview: Option<String>,
}

/// Concurrent session-id → memory map.
///
/// DashMap shards writes, so sessions never contend with each other.
/// Concurrent updates to the same key are last-write-wins, but each update
/// is applied under the entry lock, so readers never observe a half-written
/// record.
#[derive(Debug, Default)]
pub struct SessionMemoryStore {
    sessions: DashMap<String, SessionMemory>,
}

impl SessionMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of the session's memory, creating an empty record
    /// on first access. The entry API makes create-if-absent atomic: exactly
    /// one record ever exists per key, no matter how many requests race.
    pub fn get_or_create(&self, session_id: &str) -> SessionMemory {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    /// Project present fields into the translator context map, in the fixed
    /// order question, sql, error, preview. Returns `None` when the memory
    /// has never been written.
    pub fn to_context(memory: &SessionMemory) -> Option<IndexMap<String, String>> {
        let mut ctx = IndexMap::new();
        if let Some(q) = &memory.last_question {
            ctx.insert("last_question".to_string(), q.clone());
        }
        if let Some(sql) = &memory.last_sql {
            ctx.insert("last_sql".to_string(), sql.clone());
        }
        if let Some(err) = &memory.last_error {
            ctx.insert("last_error".to_string(), err.clone());
        }
        if let Some(preview) = &memory.last_rows_preview {
            ctx.insert("last_rows_preview".to_string(), preview.clone());
        }
        if ctx.is_empty() {
            None
        } else {
            Some(ctx)
        }
    }

    /// Record the outcome of one pipeline run. Called exactly once per run,
    /// on every exit path — success, rejection, translation failure,
    /// execution failure — so the memory is an audit trail of the latest
    /// attempt. A blank error clears `last_error`.
    ///
    /// All fields are written under one entry lock (atomic per call).
    pub fn update(
        &self,
        session_id: &str,
        question: &str,
        sql: &str,
        rows: &[Row],
        error: Option<&str>,
    ) {
        let mut entry = self.sessions.entry(session_id.to_string()).or_default();
        entry.last_question = Some(question.to_string());
        entry.last_sql = Some(sql.to_string());
        entry.last_error = error
            .filter(|e| !e.trim().is_empty())
            .map(|e| e.to_string());
        entry.last_rows_preview = Some(build_preview(rows));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// Render a bounded human-readable preview of a result set: the first row's
/// column names plus up to three sample rows. Preview size is independent of
/// the total result size.
fn build_preview(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "rows: []".to_string();
    }

    let columns: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    let mut preview = format!("columns: [{}]\nfirst_rows:\n", columns.join(", "));
    for row in rows.iter().take(PREVIEW_ROW_CAP) {
        let fields: Vec<String> = row
            .iter()
            .map(|(col, val)| format!("{}: {}", col, val))
            .collect();
        preview.push_str(&format!("  - {{{}}}\n", fields.join(", ")));
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::row_value::RowValue;
    use std::sync::Arc;

    fn row(pairs: &[(&str, RowValue)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn fresh_memory_projects_to_no_context() {
        let store = SessionMemoryStore::new();
        let mem = store.get_or_create("s1");
        assert_eq!(SessionMemoryStore::to_context(&mem), None);
    }

    #[test]
    fn context_preserves_field_order() {
        let store = SessionMemoryStore::new();
        store.update("s1", "list users", "SELECT * FROM users", &[], None);
        let mem = store.get_or_create("s1");
        let ctx = SessionMemoryStore::to_context(&mem).unwrap();
        let keys: Vec<&String> = ctx.keys().collect();
        assert_eq!(keys, vec!["last_question", "last_sql", "last_rows_preview"]);
    }

    #[test]
    fn blank_error_clears_last_error() {
        let store = SessionMemoryStore::new();
        store.update("s1", "q", "SELECT 1", &[], Some("boom"));
        assert_eq!(
            store.get_or_create("s1").last_error.as_deref(),
            Some("boom")
        );

        store.update("s1", "q2", "SELECT 2", &[], Some("   "));
        assert_eq!(store.get_or_create("s1").last_error, None);
    }

    #[test]
    fn preview_of_empty_rows() {
        let store = SessionMemoryStore::new();
        store.update("s1", "q", "SELECT 1", &[], None);
        assert_eq!(
            store.get_or_create("s1").last_rows_preview.as_deref(),
            Some("rows: []")
        );
    }

    #[test]
    fn preview_caps_at_three_rows() {
        let rows: Vec<Row> = (0..10)
            .map(|i| row(&[("id", RowValue::Int(i)), ("name", RowValue::from("x"))]))
            .collect();
        let store = SessionMemoryStore::new();
        store.update("s1", "q", "SELECT id, name FROM t", &rows, None);

        let preview = store.get_or_create("s1").last_rows_preview.unwrap();
        assert!(preview.starts_with("columns: [id, name]\nfirst_rows:\n"));
        assert_eq!(preview.matches("  - ").count(), 3);

        // Same shape no matter how large the result set
        let store2 = SessionMemoryStore::new();
        let many: Vec<Row> = (0..1000)
            .map(|i| row(&[("id", RowValue::Int(i)), ("name", RowValue::from("x"))]))
            .collect();
        store2.update("s1", "q", "SELECT id, name FROM t", &many, None);
        let preview2 = store2.get_or_create("s1").last_rows_preview.unwrap();
        assert_eq!(preview.lines().count(), preview2.lines().count());
    }

    #[test]
    fn preview_is_overwritten_not_appended() {
        let store = SessionMemoryStore::new();
        let first = vec![row(&[("a", RowValue::Int(1))])];
        store.update("s1", "q", "SELECT a FROM t", &first, None);
        let second = vec![row(&[("b", RowValue::Int(2))])];
        store.update("s1", "q", "SELECT b FROM t", &second, None);

        let preview = store.get_or_create("s1").last_rows_preview.unwrap();
        assert!(preview.contains("columns: [b]"));
        assert!(!preview.contains("columns: [a]"));
    }

    #[test]
    fn concurrent_get_or_create_yields_one_record() {
        let store = Arc::new(SessionMemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..100 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store.get_or_create("shared");
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 1);
    }
}
