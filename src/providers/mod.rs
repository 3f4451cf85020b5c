//! Collaborator seams consumed by the pipeline
//!
//! Each collaborator is an object-safe async trait plus its production
//! implementation: schema introspection (Postgres), natural-language to SQL
//! translation (HTTP AI service), and SELECT execution (Postgres). The
//! pipeline depends only on the traits, which is also how tests substitute
//! in-memory fakes.

pub mod executor;
pub mod schema_provider;
pub mod translator;

pub use executor::{ExecutorError, PgQueryExecutor, QueryExecutor};
pub use schema_provider::{PgSchemaProvider, SchemaError, SchemaProvider};
pub use translator::{
    HttpTranslator, TranslationRequest, TranslationResult, Translator, TranslatorError,
};
