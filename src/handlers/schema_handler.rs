//! Schema introspection endpoint

use actix_web::{get, web, HttpResponse, Responder};
use log::error;
use serde_json::json;
use std::sync::Arc;

use crate::providers::SchemaProvider;

/// GET /api/v1/schema — return the live public schema.
///
/// # Example Response
/// ```json
/// {
///   "tables": [
///     {"name": "users", "columns": ["id", "name", "created_at"]}
///   ]
/// }
/// ```
#[get("/schema")]
pub async fn schema(provider: web::Data<Arc<dyn SchemaProvider>>) -> impl Responder {
    match provider.load_public_schema().await {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(e) => {
            error!("Schema introspection failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
