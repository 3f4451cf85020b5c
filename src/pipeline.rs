//! SQL generation pipeline
//!
//! Composes the collaborators into the two public operations: "generate SQL
//! only" and "generate and execute". Per request the pipeline attaches the
//! live schema, projects prior-turn session memory into translator context,
//! delegates to the AI translator, validates the candidate statement with
//! the safety guard, optionally executes it with an enforced row ceiling,
//! and records the outcome — success or failure — into session memory.
//!
//! Both entry points funnel through the same generation step, so neither can
//! bypass the guard.

use crate::guard;
use crate::memory::SessionMemoryStore;
use crate::models::row_value::Row;
use crate::models::schema::{SchemaSnapshot, TableSchema};
use crate::providers::{
    QueryExecutor, SchemaProvider, TranslationRequest, Translator,
};
use log::{debug, info, warn};
use std::sync::Arc;

/// Fallback when the translator fails without a message of its own.
const TRANSLATOR_FAILURE_FALLBACK: &str = "AI service call failed";
/// Message recorded when the translator answers but produces no SQL.
const EMPTY_SQL_MESSAGE: &str = "AI returned empty SQL";
/// Fallback when the executor fails without a message of its own.
const EXECUTION_FAILURE_FALLBACK: &str = "SQL execution failed";

/// Terminal state of one pipeline run.
///
/// The SQL carried by `RejectedByPolicy` is the original unvalidated
/// statement — it is still surfaced to the caller for diagnosability.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The question was empty or blank; no external call was attempted and
    /// no memory was recorded (there is no SQL to remember).
    BlankQuestion,
    /// Schema fetch or translator call failed, or the translator produced
    /// no SQL. Maps to an upstream-error response.
    TranslationFailed { error: String },
    /// The guard rejected the candidate statement.
    RejectedByPolicy { sql: String, error: String },
    /// Generation succeeded; the SQL passed the guard.
    Generated { sql: String },
    /// The statement passed the guard but the database refused it.
    ExecutionFailed { sql: String, error: String },
    /// Execution succeeded.
    ExecutedOk { sql: String, rows: Vec<Row> },
}

/// The orchestrator. Holds the collaborator seams and the row-ceiling
/// policy; one instance is shared across all requests.
pub struct Nl2SqlPipeline {
    schema_provider: Arc<dyn SchemaProvider>,
    translator: Arc<dyn Translator>,
    executor: Arc<dyn QueryExecutor>,
    memory: Arc<SessionMemoryStore>,
    max_rows: usize,
}

impl Nl2SqlPipeline {
    pub fn new(
        schema_provider: Arc<dyn SchemaProvider>,
        translator: Arc<dyn Translator>,
        executor: Arc<dyn QueryExecutor>,
        memory: Arc<SessionMemoryStore>,
        max_rows: usize,
    ) -> Self {
        Self {
            schema_provider,
            translator,
            executor,
            memory,
            max_rows,
        }
    }

    /// Generate SQL for a question without touching the database
    /// (review-before-run use case).
    pub async fn generate(
        &self,
        question: &str,
        language: Option<&str>,
        session_id: &str,
    ) -> PipelineOutcome {
        self.generate_with_schema(question, language, session_id, None)
            .await
    }

    /// Generate SQL and execute it with the row ceiling enforced.
    ///
    /// A non-empty `caller_schema` pins the snapshot for this call instead
    /// of a fresh introspection round-trip.
    pub async fn generate_and_execute(
        &self,
        question: &str,
        language: Option<&str>,
        session_id: &str,
        caller_schema: Option<Vec<TableSchema>>,
    ) -> PipelineOutcome {
        let pinned = caller_schema
            .filter(|tables| !tables.is_empty())
            .map(SchemaSnapshot::new);

        let generated = self
            .generate_with_schema(question, language, session_id, pinned)
            .await;
        let sql = match generated {
            PipelineOutcome::Generated { sql } => sql,
            // Memory was already recorded inside the generation step.
            other => return other,
        };

        let limited = guard::enforce_limit(&sql, self.max_rows);

        match self.executor.execute_select(&limited).await {
            Ok(rows) => {
                info!("Executed generated SQL: {} row(s)", rows.len());
                self.memory.update(session_id, question, &limited, &rows, None);
                PipelineOutcome::ExecutedOk { sql: limited, rows }
            }
            Err(e) => {
                let message = message_or(&e.to_string(), EXECUTION_FAILURE_FALLBACK);
                warn!("SQL execution failed: {}", message);
                self.memory
                    .update(session_id, question, &limited, &[], Some(&message));
                PipelineOutcome::ExecutionFailed {
                    sql: limited,
                    error: message,
                }
            }
        }
    }

    /// The shared generation step: schema → context → translator → guard.
    /// Every exit path except the blank-question check records session
    /// memory exactly once before returning.
    async fn generate_with_schema(
        &self,
        question: &str,
        language: Option<&str>,
        session_id: &str,
        schema_override: Option<SchemaSnapshot>,
    ) -> PipelineOutcome {
        if question.trim().is_empty() {
            return PipelineOutcome::BlankQuestion;
        }

        let schema = match schema_override {
            Some(snapshot) => snapshot,
            None => match self.schema_provider.load_public_schema().await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    // The translator cannot work without schema; treated as
                    // an upstream failure like a translator transport error.
                    let message = message_or(&e.to_string(), TRANSLATOR_FAILURE_FALLBACK);
                    warn!("Schema fetch failed: {}", message);
                    self.memory
                        .update(session_id, question, "", &[], Some(&message));
                    return PipelineOutcome::TranslationFailed { error: message };
                }
            },
        };

        let memory = self.memory.get_or_create(session_id);
        let context = SessionMemoryStore::to_context(&memory);

        let request = TranslationRequest {
            question: question.to_string(),
            language: language.map(str::to_string),
            schema: schema.tables,
            context,
        };

        let result = match self.translator.translate(&request).await {
            Ok(result) => result,
            Err(e) => {
                let message = message_or(&e.to_string(), TRANSLATOR_FAILURE_FALLBACK);
                warn!("AI translation failed: {}", message);
                self.memory
                    .update(session_id, question, "", &[], Some(&message));
                return PipelineOutcome::TranslationFailed { error: message };
            }
        };

        let sql = result.sql.unwrap_or_default();
        let sql = sql.trim();
        if sql.is_empty() {
            warn!("AI returned empty SQL for question: {:?}", question);
            self.memory
                .update(session_id, question, "", &[], Some(EMPTY_SQL_MESSAGE));
            return PipelineOutcome::TranslationFailed {
                error: EMPTY_SQL_MESSAGE.to_string(),
            };
        }

        if let Err(reason) = guard::validate(sql) {
            let message = reason.to_string();
            warn!("Guard rejected generated SQL: {}", message);
            self.memory
                .update(session_id, question, sql, &[], Some(&message));
            return PipelineOutcome::RejectedByPolicy {
                sql: sql.to_string(),
                error: message,
            };
        }

        debug!("Generated SQL passed guard: {}", sql);
        self.memory.update(session_id, question, sql, &[], None);
        PipelineOutcome::Generated {
            sql: sql.to_string(),
        }
    }
}

/// Replace a blank collaborator message with a generic fallback so internal
/// failures never surface as empty error strings.
fn message_or(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}
