//! Session store
//!
//! One entry per interactive user session:
//! - state machine Idle / Populated / Errored, replaced atomically per generate
//! - at most one generate in flight per session
//! - teardown cancels the in-flight generate
//! - idle sessions are swept after a TTL

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{oneshot, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::pipeline::{GenerateInput, GeneratedResume, ResumePipeline};
use crate::render::RenderedDocument;

/// What a session currently holds.
#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    Populated(Arc<GeneratedResume>),
    Errored { code: &'static str, message: String },
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Populated(_) => "populated",
            SessionState::Errored { .. } => "errored",
        }
    }
}

/// Point-in-time copy of a session, safe to hold without the lock.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub state: SessionState,
    pub generating: bool,
    pub created_at: DateTime<Utc>,
}

struct Session {
    state: SessionState,
    /// Present while a generate is running; dropping or firing it cancels the run.
    cancel: Option<oneshot::Sender<()>>,
    created_at: DateTime<Utc>,
    last_active: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            state: SessionState::Idle,
            cancel: None,
            created_at: Utc::now(),
            last_active: Instant::now(),
        }
    }

    fn snapshot(&self, id: Uuid) -> SessionSnapshot {
        SessionSnapshot {
            id,
            state: self.state.clone(),
            generating: self.cancel.is_some(),
            created_at: self.created_at,
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Default)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

/// Error code recorded when a generate is dropped before it records an outcome.
pub const GENERATE_INTERRUPTED: &str = "GENERATE_INTERRUPTED";

/// Holds a session's generate slot. If the generate future is dropped while armed
/// (client disconnect, aborted task), the slot is released and the session moves to
/// `Errored` so it can neither stay locked nor be exempt from expiry.
struct InFlight {
    store: SessionStore,
    id: Uuid,
    armed: bool,
}

impl InFlight {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let id = self.id;
        if let Ok(mut sessions) = self.store.inner.sessions.try_write() {
            release_interrupted(&mut sessions, id);
            return;
        }
        // Lock is busy; finish the release on the runtime.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let store = self.store.clone();
                handle.spawn(async move {
                    release_interrupted(&mut *store.inner.sessions.write().await, id);
                });
            }
            Err(_) => tracing::warn!(
                session_id = %id,
                "Generate dropped outside a runtime; slot not released"
            ),
        }
    }
}

fn release_interrupted(sessions: &mut HashMap<Uuid, Session>, id: Uuid) {
    let Some(session) = sessions.get_mut(&id) else {
        return;
    };
    session.cancel = None;
    session.last_active = Instant::now();
    session.state = SessionState::Errored {
        code: GENERATE_INTERRUPTED,
        message: "The previous generate was interrupted before it finished".to_string(),
    };
    tracing::warn!(session_id = %id, "Generate interrupted before completion");
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub async fn create(&self) -> SessionSnapshot {
        let id = Uuid::new_v4();
        let session = Session::new();
        let snapshot = session.snapshot(id);

        self.inner.sessions.write().await.insert(id, session);
        tracing::info!(session_id = %id, "Created session");

        snapshot
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionSnapshot, AppError> {
        let sessions = self.inner.sessions.read().await;
        sessions
            .get(&id)
            .map(|s| s.snapshot(id))
            .ok_or_else(|| not_found(id))
    }

    /// Ends a session. An in-flight generate on it returns `SessionClosed`.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let session = self
            .inner
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| not_found(id))?;

        if let Some(cancel) = session.cancel {
            let _ = cancel.send(());
            tracing::info!(session_id = %id, "Cancelled in-flight generate");
        }
        tracing::info!(session_id = %id, "Closed session");
        Ok(())
    }

    pub async fn session_count(&self) -> usize {
        self.inner.sessions.read().await.len()
    }

    /// The rendered document of a populated session.
    pub async fn document(&self, id: Uuid) -> Result<RenderedDocument, AppError> {
        let sessions = self.inner.sessions.read().await;
        let session = sessions.get(&id).ok_or_else(|| not_found(id))?;
        match &session.state {
            SessionState::Populated(generated) => Ok(generated.document.clone()),
            _ => Err(AppError::NotFound(format!(
                "Session {id} has no generated document"
            ))),
        }
    }

    // ========================================================================
    // Generate
    // ========================================================================

    /// Runs the pipeline for one session and records the outcome.
    ///
    /// Incomplete input is rejected before anything else happens and leaves the session
    /// untouched. Any pipeline failure moves the session to `Errored` and drops the
    /// previous profile. Dropping the returned future mid-run does the same, with
    /// `GENERATE_INTERRUPTED` as the code.
    pub async fn generate(
        &self,
        id: Uuid,
        input: GenerateInput,
        pipeline: &ResumePipeline,
    ) -> Result<SessionSnapshot, AppError> {
        let validated = {
            let sessions = self.inner.sessions.read().await;
            if !sessions.contains_key(&id) {
                return Err(not_found(id));
            }
            input.validate()?
        };

        let mut cancelled = {
            let mut sessions = self.inner.sessions.write().await;
            let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
            if session.cancel.is_some() {
                return Err(AppError::Conflict(format!(
                    "Session {id} is already generating"
                )));
            }
            let (tx, rx) = oneshot::channel();
            session.cancel = Some(tx);
            session.last_active = Instant::now();
            rx
        };
        let mut in_flight = InFlight {
            store: self.clone(),
            id,
            armed: true,
        };

        tracing::info!(session_id = %id, "Generate started");

        let result = tokio::select! {
            result = pipeline.run(validated) => result,
            _ = &mut cancelled => {
                in_flight.disarm();
                tracing::info!(session_id = %id, "Generate abandoned: session closed");
                return Err(AppError::SessionClosed(id));
            }
        };

        let mut sessions = self.inner.sessions.write().await;
        in_flight.disarm();
        let session = sessions
            .get_mut(&id)
            .ok_or(AppError::SessionClosed(id))?;
        session.cancel = None;
        session.last_active = Instant::now();

        match result {
            Ok(generated) => {
                tracing::info!(
                    session_id = %id,
                    ats_score = generated.profile.ats_score.value(),
                    "Generate succeeded"
                );
                session.state = SessionState::Populated(Arc::new(generated));
                Ok(session.snapshot(id))
            }
            Err(err) => {
                tracing::warn!(session_id = %id, code = err.code(), "Generate failed: {err}");
                session.state = SessionState::Errored {
                    code: err.code(),
                    message: err.public_message(),
                };
                Err(err)
            }
        }
    }

    // ========================================================================
    // Expiry
    // ========================================================================

    /// Removes sessions idle for longer than `ttl`. Sessions mid-generate are kept.
    pub async fn sweep_expired(&self, ttl: Duration) -> usize {
        let mut sessions = self.inner.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let keep = session.cancel.is_some() || session.last_active.elapsed() <= ttl;
            if !keep {
                tracing::debug!(session_id = %id, "Expired session");
            }
            keep
        });
        let removed = before - sessions.len();

        if removed > 0 {
            tracing::info!(count = removed, "Swept expired sessions");
        }
        removed
    }

    /// Background sweeper; runs every `ttl / 4` (at least once a second).
    pub fn start_sweeper(self, ttl: Duration) -> tokio::task::JoinHandle<()> {
        let period = (ttl / 4).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                self.sweep_expired(ttl).await;
            }
        })
    }
}
