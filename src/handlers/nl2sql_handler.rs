//! NL2SQL endpoints
//!
//! Two entry points share one pipeline:
//! - POST /api/v1/nl2sql — generate SQL only, never touches the database
//! - POST /api/v1/ask — generate SQL, then execute it with the row ceiling
//!
//! # Session identity
//! The `X-Session-Id` request header names the conversational session. When
//! absent a fresh UUID is generated; either way the effective id is echoed
//! back in the `X-Session-Id` response header so clients can keep the
//! conversation going.
//!
//! # Status mapping
//! | Outcome | Status |
//! |---|---|
//! | Blank question | 400 |
//! | Translator failure / empty SQL | 502 |
//! | Guard rejection | 400 |
//! | Execution failure (ask only) | 422 |
//! | Success | 200 |

use actix_web::http::StatusCode;
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

use crate::models::{Nl2SqlRequest, Nl2SqlResponse};
use crate::pipeline::{Nl2SqlPipeline, PipelineOutcome};

pub const SESSION_HEADER: &str = "X-Session-Id";

/// POST /api/v1/nl2sql — generate SQL without executing it.
///
/// # Example Request
/// ```json
/// {
///   "question": "list all users",
///   "language": "en"
/// }
/// ```
///
/// # Example Response
/// ```json
/// {
///   "sql": "SELECT id, name FROM users",
///   "rows": []
/// }
/// ```
#[post("/nl2sql")]
pub async fn nl2sql(
    http_req: HttpRequest,
    req: web::Json<Nl2SqlRequest>,
    pipeline: web::Data<Arc<Nl2SqlPipeline>>,
) -> impl Responder {
    let session_id = resolve_session_id(&http_req);
    let outcome = pipeline
        .generate(&req.question, req.language.as_deref(), &session_id)
        .await;
    respond(outcome, &session_id)
}

/// POST /api/v1/ask — generate SQL and run it against the database.
///
/// A non-empty `schema` in the request pins the snapshot for this call;
/// otherwise the live schema is introspected.
#[post("/ask")]
pub async fn ask(
    http_req: HttpRequest,
    req: web::Json<Nl2SqlRequest>,
    pipeline: web::Data<Arc<Nl2SqlPipeline>>,
) -> impl Responder {
    let session_id = resolve_session_id(&http_req);
    let req = req.into_inner();
    let outcome = pipeline
        .generate_and_execute(&req.question, req.language.as_deref(), &session_id, req.schema)
        .await;
    respond(outcome, &session_id)
}

fn resolve_session_id(req: &HttpRequest) -> String {
    req.headers()
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Map a pipeline outcome to the contractual status code and body. The body
/// always carries whatever SQL was produced, even on failure.
fn respond(outcome: PipelineOutcome, session_id: &str) -> HttpResponse {
    let (status, body) = match outcome {
        PipelineOutcome::BlankQuestion => {
            (StatusCode::BAD_REQUEST, Nl2SqlResponse::sql_only(""))
        }
        PipelineOutcome::TranslationFailed { error } => {
            (StatusCode::BAD_GATEWAY, Nl2SqlResponse::error("", error))
        }
        PipelineOutcome::RejectedByPolicy { sql, error } => {
            (StatusCode::BAD_REQUEST, Nl2SqlResponse::error(sql, error))
        }
        PipelineOutcome::Generated { sql } => (StatusCode::OK, Nl2SqlResponse::sql_only(sql)),
        PipelineOutcome::ExecutionFailed { sql, error } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Nl2SqlResponse::error(sql, error),
        ),
        PipelineOutcome::ExecutedOk { sql, rows } => {
            (StatusCode::OK, Nl2SqlResponse::with_rows(sql, rows))
        }
    };

    HttpResponse::build(status)
        .insert_header((SESSION_HEADER, session_id))
        .json(body)
}
