//! Axum route handlers for the Session API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::view::ProfileView;
use crate::session::store::{SessionSnapshot, SessionState};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub state: &'static str,
    pub generating: bool,
    pub created_at: DateTime<Utc>,
    pub profile: Option<ProfileView>,
    pub document: Option<DocumentInfo>,
    pub error: Option<SessionErrorInfo>,
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct DocumentInfo {
    pub file_name: String,
    pub size_bytes: usize,
    pub page_count: usize,
    pub download_url: String,
}

#[derive(Debug, Serialize)]
pub struct SessionErrorInfo {
    pub code: &'static str,
    pub message: String,
}

impl From<&SessionSnapshot> for SessionResponse {
    fn from(snapshot: &SessionSnapshot) -> Self {
        let mut response = SessionResponse {
            session_id: snapshot.id,
            state: snapshot.state.label(),
            generating: snapshot.generating,
            created_at: snapshot.created_at,
            profile: None,
            document: None,
            error: None,
            generated_at: None,
        };

        match &snapshot.state {
            SessionState::Idle => {}
            SessionState::Populated(generated) => {
                response.profile = Some(ProfileView::from(&generated.profile));
                response.document = Some(DocumentInfo {
                    file_name: generated.document.file_name.clone(),
                    size_bytes: generated.document.bytes.len(),
                    page_count: generated.document.page_count,
                    download_url: format!("/api/v1/sessions/{}/document", snapshot.id),
                });
                response.generated_at = Some(generated.generated_at);
            }
            SessionState::Errored { code, message } => {
                response.error = Some(SessionErrorInfo {
                    code: *code,
                    message: message.clone(),
                });
            }
        }

        response
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let snapshot = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionResponse::from(&snapshot)))
}

/// GET /api/v1/sessions/:id
///
/// Current state plus the grouped profile view once populated.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let snapshot = state.sessions.get(session_id).await?;
    Ok(Json(SessionResponse::from(&snapshot)))
}

/// DELETE /api/v1/sessions/:id
///
/// Ends the session and discards its profile. A running generate is cancelled.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
