use std::sync::Arc;

use crate::config::Config;
use crate::generation::pipeline::ResumePipeline;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// In-memory per-user sessions. Cloning shares the same store.
    pub sessions: SessionStore,
    /// Extractor, inference backend and page geometry, fixed at startup.
    pub pipeline: Arc<ResumePipeline>,
}
