//! Axum route handlers for generation and document download.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::pipeline::GenerateInput;
use crate::render::PDF_CONTENT_TYPE;
use crate::session::handlers::SessionResponse;
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// POST /api/v1/sessions/:id/generate
///
/// Multipart form: `resume` (PDF file) and `job_description` (text).
/// Missing parts are reported as `INPUT_INCOMPLETE` without touching the session.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<SessionResponse>, AppError> {
    let input = read_generate_form(multipart).await?;

    let snapshot = state
        .sessions
        .generate(session_id, input, &state.pipeline)
        .await?;

    Ok(Json(SessionResponse::from(&snapshot)))
}

async fn read_generate_form(mut multipart: Multipart) -> Result<GenerateInput, AppError> {
    let mut input = GenerateInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file data: {e}")))?;
                tracing::debug!("Read {} bytes of résumé upload", data.len());
                input.resume = Some(data);
            }
            JOB_DESCRIPTION_FIELD => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
                input.job_description = Some(text);
            }
            other => tracing::warn!("Ignoring unexpected form field '{other}'"),
        }
    }

    Ok(input)
}

/// GET /api/v1/sessions/:id/document
///
/// Downloads the rendered PDF of a populated session.
pub async fn handle_download_document(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let document = state.sessions.document(session_id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PDF_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, document.bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&document.file_name),
        )
        .body(Body::from(document.bytes))
        .map_err(|e| AppError::Internal(e.into()))
}

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8 name.
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_ascii_name() {
        assert_eq!(
            content_disposition("Jane Doe_Resume.pdf"),
            "attachment; filename=\"Jane Doe_Resume.pdf\"; filename*=UTF-8''Jane%20Doe_Resume.pdf"
        );
    }

    #[test]
    fn test_content_disposition_unicode_name() {
        let value = content_disposition("José Álvarez_Resume.pdf");
        assert!(value.contains("filename=\"Jos_ _lvarez_Resume.pdf\""), "{value}");
        assert!(value.contains("filename*=UTF-8''Jos%C3%A9%20%C3%81lvarez_Resume.pdf"));
        assert!(value.is_ascii());
    }
}
