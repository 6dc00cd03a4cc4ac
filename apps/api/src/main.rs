mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::extract::PdfTextExtractor;
use crate::generation::pipeline::ResumePipeline;
use crate::layout::{Margins, PageGeometry};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing GROQ_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Résumé Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Page geometry is fixed before any document is laid out
    let a4 = PageGeometry::a4();
    let geometry = PageGeometry::new(
        a4.width(),
        a4.height(),
        Margins::uniform(config.page_margin_mm),
    )
    .context("Invalid PAGE_MARGIN_MM")?;
    info!(
        "Page geometry: A4, {}mm margins, {:.0}mm printable width",
        config.page_margin_mm,
        geometry.printable_width()
    );

    // Initialize LLM client
    let llm = LlmClient::new(&config)?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s, retries: {})",
        llm_client::MODEL,
        config.llm_timeout_secs,
        config.llm_max_retries
    );

    let pipeline = Arc::new(ResumePipeline::new(
        Arc::new(PdfTextExtractor),
        Arc::new(llm),
        geometry,
    ));

    // Session store with background expiry
    let sessions = SessionStore::new();
    sessions
        .clone()
        .start_sweeper(Duration::from_secs(config.session_ttl_secs));
    info!("Session store initialized (ttl: {}s)", config.session_ttl_secs);

    // Build app state
    let state = AppState {
        config: config.clone(),
        sessions,
        pipeline,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
