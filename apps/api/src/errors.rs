use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::generation::extract::ExtractionError;
use crate::llm_client::InferenceError;
use crate::models::profile::ParseError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input incomplete: {0}")]
    InputIncomplete(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("Model output rejected: {0}")]
    Parse(#[from] ParseError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Session {0} was closed")]
    SessionClosed(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, also recorded on errored sessions.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InputIncomplete(_) => "INPUT_INCOMPLETE",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::Inference(_) => "INFERENCE_ERROR",
            AppError::Parse(_) => "PARSE_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::SessionClosed(_) => "SESSION_CLOSED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InputIncomplete(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Inference(InferenceError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Inference(InferenceError::RateLimited { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Inference(_) | AppError::Parse(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::SessionClosed(_) => StatusCode::GONE,
            AppError::Render(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the user. Upstream and internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InputIncomplete(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Validation(msg) => msg.clone(),
            AppError::Extraction(e) => e.to_string(),
            AppError::Inference(InferenceError::Timeout { .. }) => {
                "The AI service did not respond in time".to_string()
            }
            AppError::Inference(InferenceError::RateLimited { .. }) => {
                "The AI service is rate limiting requests; try again shortly".to_string()
            }
            AppError::Inference(_) => "An AI processing error occurred".to_string(),
            AppError::Parse(_) => {
                "The AI response could not be read as a resume profile".to_string()
            }
            AppError::SessionClosed(_) => "The session was closed".to_string(),
            AppError::Render(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Inference(e) => tracing::error!("Inference error: {e}"),
            AppError::Parse(e) => tracing::error!("Parse error: {e}"),
            AppError::Render(e) => tracing::error!("Render error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.public_message()
            }
        }));

        (self.status(), body).into_response()
    }
}
