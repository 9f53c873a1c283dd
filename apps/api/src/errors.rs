use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::leaders::resolver::ResolveError;
use crate::llm_client::normalize::NormalizeError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to read PDF files. Error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Failed to generate content from AI model. Error: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Leader(#[from] ResolveError),

    #[error("An unexpected error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut extra = Map::new();

        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                tracing::warn!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    self.to_string(),
                )
            }
            AppError::Llm(LlmError::EmptyContent) => {
                tracing::error!("AI model returned an empty response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMPTY_AI_RESPONSE",
                    "AI model returned an empty response.".to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("Error calling AI model: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    self.to_string(),
                )
            }
            AppError::Normalize(e) => {
                tracing::error!("Error parsing AI response: {e}");
                extra.insert("content".to_string(), Value::from(e.content()));
                let (code, message) = match e {
                    NormalizeError::NoJsonFound { .. } => {
                        ("NO_JSON_FOUND", format!("Invalid response structure: {e}"))
                    }
                    NormalizeError::MalformedJson { .. } => {
                        ("MALFORMED_JSON", "Failed to parse as JSON".to_string())
                    }
                };
                (StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }
            AppError::Leader(e) => {
                tracing::error!("Leader resolution error: {e}");
                extra.insert(
                    "details".to_string(),
                    Value::from("Failed to fetch leader information"),
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "WIKIPEDIA_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    self.to_string(),
                )
            }
        };

        let mut body = Map::new();
        body.insert("error".to_string(), Value::from(message));
        body.insert("code".to_string(), Value::from(code));
        body.extend(extra);

        (status, Json(Value::Object(body))).into_response()
    }
}
