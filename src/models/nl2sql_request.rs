//! Request model for the NL2SQL endpoints
//!
//! Both `/api/v1/nl2sql` and `/api/v1/ask` accept the same payload.

use crate::models::schema::TableSchema;
use serde::{Deserialize, Serialize};

/// Request payload for SQL generation.
///
/// # Example
/// ```json
/// {
///   "question": "list all users",
///   "language": "en"
/// }
/// ```
///
/// `schema` is optional: when present and non-empty on `/ask` it pins the
/// schema snapshot for that call instead of a fresh introspection round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nl2SqlRequest {
    /// The natural-language question to translate.
    pub question: String,

    /// Optional language hint for the translator ("tr", "en", ...).
    #[serde(default)]
    pub language: Option<String>,

    /// Optional caller-supplied schema override.
    #[serde(default)]
    pub schema: Option<Vec<TableSchema>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_minimal_payload() {
        let json = r#"{"question": "list all users"}"#;
        let req: Nl2SqlRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.question, "list all users");
        assert!(req.language.is_none());
        assert!(req.schema.is_none());
    }

    #[test]
    fn test_request_with_schema_override() {
        let json = r#"{
            "question": "top customers",
            "language": "en",
            "schema": [{"name": "customers", "columns": ["id", "name"]}]
        }"#;
        let req: Nl2SqlRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.language.as_deref(), Some("en"));
        let schema = req.schema.unwrap();
        assert_eq!(schema.len(), 1);
        assert_eq!(schema[0].name, "customers");
    }
}
