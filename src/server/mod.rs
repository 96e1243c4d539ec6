pub mod handlers;
pub mod types;

use crate::{
    Result,
    agent::Runner,
    config::Config,
    llm::OpenAiClient,
    session::SessionRegistry,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use handlers::AppState;

/// Generous enough for a handful of PDF uploads per request.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/generate-flashcards", post(handlers::generate_flashcards))
        .route("/generate-quiz", post(handlers::generate_quiz))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let sessions = Arc::new(SessionRegistry::new());
    info!("Initialized in-memory session registry");

    let llm_client = Arc::new(OpenAiClient::new(config.llm.clone()));
    let runner = Arc::new(Runner::new(
        llm_client,
        sessions,
        Duration::from_secs(config.generation.agent_timeout_secs),
    ));

    let state = AppState {
        runner,
        config: Arc::new(config.clone()),
    };

    let app = router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
