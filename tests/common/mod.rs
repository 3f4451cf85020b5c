//! In-memory fake collaborators for pipeline and API tests

use async_trait::async_trait;
use nl2sql_server::memory::SessionMemoryStore;
use nl2sql_server::models::{Row, RowValue, SchemaSnapshot, TableSchema};
use nl2sql_server::pipeline::Nl2SqlPipeline;
use nl2sql_server::providers::{
    ExecutorError, QueryExecutor, SchemaError, SchemaProvider, TranslationRequest,
    TranslationResult, Translator, TranslatorError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Schema provider with a canned snapshot; counts calls so tests can assert
/// when introspection was skipped. Can be flipped to fail instead.
pub struct FakeSchemaProvider {
    pub snapshot: SchemaSnapshot,
    pub failure: Mutex<Option<String>>,
    pub calls: AtomicUsize,
}

impl FakeSchemaProvider {
    pub fn with_users_table() -> Self {
        Self {
            snapshot: SchemaSnapshot::new(vec![TableSchema {
                name: "users".to_string(),
                columns: vec!["id".to_string(), "name".to_string()],
            }]),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl SchemaProvider for FakeSchemaProvider {
    async fn load_public_schema(&self) -> Result<SchemaSnapshot, SchemaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(SchemaError::Introspection(message));
        }
        Ok(self.snapshot.clone())
    }
}

/// What the fake translator should answer.
#[derive(Clone)]
pub enum TranslatorBehavior {
    Sql(String),
    Empty,
    TransportFailure(String),
}

/// Translator that records the last request it saw, so tests can assert on
/// the context map and the schema that reached it. The behavior can be
/// swapped mid-test to script multi-turn conversations.
pub struct FakeTranslator {
    pub behavior: Mutex<TranslatorBehavior>,
    pub last_request: Mutex<Option<TranslationRequest>>,
}

impl FakeTranslator {
    pub fn returning(sql: &str) -> Self {
        Self {
            behavior: Mutex::new(TranslatorBehavior::Sql(sql.to_string())),
            last_request: Mutex::new(None),
        }
    }

    pub fn empty() -> Self {
        Self {
            behavior: Mutex::new(TranslatorBehavior::Empty),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            behavior: Mutex::new(TranslatorBehavior::TransportFailure(message.to_string())),
            last_request: Mutex::new(None),
        }
    }

    pub fn set_behavior(&self, behavior: TranslatorBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslatorError> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        let behavior = self.behavior.lock().unwrap().clone();
        match &behavior {
            TranslatorBehavior::Sql(sql) => Ok(TranslationResult {
                sql: Some(sql.clone()),
                error: None,
            }),
            TranslatorBehavior::Empty => Ok(TranslationResult::default()),
            TranslatorBehavior::TransportFailure(msg) => {
                Err(TranslatorError::Transport(msg.clone()))
            }
        }
    }
}

/// Executor with canned rows or a canned failure; records the SQL it was
/// handed so tests can verify the limit clause.
pub struct FakeExecutor {
    pub rows: Vec<Row>,
    pub failure: Option<String>,
    pub last_sql: Mutex<Option<String>>,
    pub calls: AtomicUsize,
}

impl FakeExecutor {
    pub fn returning(rows: Vec<Row>) -> Self {
        Self {
            rows,
            failure: None,
            last_sql: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some(message.to_string()),
            last_sql: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QueryExecutor for FakeExecutor {
    async fn execute_select(&self, sql: &str) -> Result<Vec<Row>, ExecutorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_sql.lock().unwrap() = Some(sql.to_string());
        match &self.failure {
            Some(msg) => Err(ExecutorError::Query(msg.clone())),
            None => Ok(self.rows.clone()),
        }
    }
}

/// Build a pipeline over the given fakes with the default 100-row ceiling.
pub struct TestHarness {
    pub pipeline: Arc<Nl2SqlPipeline>,
    pub memory: Arc<SessionMemoryStore>,
    pub schema_provider: Arc<FakeSchemaProvider>,
    pub translator: Arc<FakeTranslator>,
    pub executor: Arc<FakeExecutor>,
}

pub fn harness(translator: FakeTranslator, executor: FakeExecutor) -> TestHarness {
    let schema_provider = Arc::new(FakeSchemaProvider::with_users_table());
    let translator = Arc::new(translator);
    let executor = Arc::new(executor);
    let memory = Arc::new(SessionMemoryStore::new());

    let pipeline = Arc::new(Nl2SqlPipeline::new(
        schema_provider.clone(),
        translator.clone(),
        executor.clone(),
        memory.clone(),
        100,
    ));

    TestHarness {
        pipeline,
        memory,
        schema_provider,
        translator,
        executor,
    }
}

pub fn sample_row(id: i64, name: &str) -> Row {
    let mut row = Row::new();
    row.insert("id".to_string(), RowValue::Int(id));
    row.insert("name".to_string(), RowValue::Text(name.to_string()));
    row
}
