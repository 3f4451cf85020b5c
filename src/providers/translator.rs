//! AI translation service client
//!
//! The translator is an external HTTP service that takes a question, the
//! current schema, and optional prior-turn context, and answers with a
//! candidate SQL string. This module defines the wire models, the trait the
//! pipeline consumes, and the reqwest-backed production client.

use crate::models::schema::TableSchema;
use async_trait::async_trait;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Payload sent to the translation service. Constructed per call and never
/// mutated after construction.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub schema: Vec<TableSchema>,
    /// Prior-turn memory projected by the session store, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<IndexMap<String, String>>,
}

/// Answer from the translation service. A missing or blank `sql` is a valid
/// response (the service could not produce a statement); a transport failure
/// is a `TranslatorError` instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationResult {
    #[serde(default)]
    pub sql: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Errors from the translation client.
#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    /// Request never completed: connect error, timeout, non-2xx status.
    #[error("AI service call failed: {0}")]
    Transport(String),

    /// The service answered but the body could not be decoded.
    #[error("AI service returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Natural-language to SQL translation seam.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslationRequest)
        -> Result<TranslationResult, TranslatorError>;
}

/// Production client for the FastAPI-style translation service:
/// `POST {base_url}/generate-sql` with a JSON body.
pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranslator {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build AI service client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslatorError> {
        let url = format!("{}/generate-sql", self.base_url);
        debug!(
            "AI translate request: url={} question_len={} tables={} context={}",
            url,
            request.question.len(),
            request.schema.len(),
            request.context.is_some()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| TranslatorError::Transport(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| TranslatorError::Transport(e.to_string()))?;

        response
            .json::<TranslationResult>()
            .await
            .map_err(|e| TranslatorError::InvalidResponse(e.to_string()))
    }
}
