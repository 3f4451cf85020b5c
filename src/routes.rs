//! API routes configuration
//!
//! This module configures all HTTP routes for the NL2SQL API.

use crate::handlers;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Configure API routes
///
/// All endpoints use the /api/v1 prefix:
/// - POST /api/v1/nl2sql - Generate SQL from a natural-language question
/// - POST /api/v1/ask - Generate SQL and execute it
/// - GET /api/v1/schema - Live public schema snapshot
/// - GET /api/v1/healthcheck - Health check endpoint
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(handlers::nl2sql)
            .service(handlers::ask)
            .service(handlers::schema)
            .route("/healthcheck", web::get().to(healthcheck_handler)),
    );
}

/// Health check endpoint handler
async fn healthcheck_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1"
    }))
}
