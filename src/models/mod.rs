//! Request/response and data models for the NL2SQL API

pub mod nl2sql_request;
pub mod nl2sql_response;
pub mod row_value;
pub mod schema;

pub use nl2sql_request::Nl2SqlRequest;
pub use nl2sql_response::Nl2SqlResponse;
pub use row_value::{Row, RowValue};
pub use schema::{SchemaSnapshot, TableSchema};
