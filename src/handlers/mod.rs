//! HTTP request handlers
//!
//! This module provides the handlers for the NL2SQL REST API.

pub mod nl2sql_handler;
pub mod schema_handler;

pub use nl2sql_handler::*;
pub use schema_handler::schema;
