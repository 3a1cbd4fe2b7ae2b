use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
pub mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;
use crate::routes::{
    ask::{ask_route::ask, ask_stream_route::ask_stream},
    static_pages::{favicon, index},
};

const DEFAULT_PORT: u16 = 3000;

/// Builds the application router over shared state.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/favicon.ico", get(favicon))
        .route("/ask", post(ask))
        .route("/ask/stream", post(ask_stream))
        .with_state(state)
}

/// Loads state from the environment, binds the listener and serves until
/// ctrl-c. A missing `GEMINI_API_KEY` fails here, before binding.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(AppError::Bind)?;
    info!("listening on http://0.0.0.0:{port}");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    // Wait for the Ctrl+C signal
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
