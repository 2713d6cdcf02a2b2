mod core;
mod error_handler;
mod routes;

pub use crate::core::{
    app_config::ApiConfig,
    app_state::AppState,
    render::PageRenderer,
    session::{SESSION_COOKIE, SessionStore, Turn},
};
pub use error_handler::{AppError, AppResult};

use axum::{Router, routing::get};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::routes::chat::chat_route::{ask_question, chat_page};

/// Builds the application router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(chat_page).post(ask_question))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Loads configuration, wires services and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let cfg = ApiConfig::from_env()?;
    let state = AppState::from_env(&cfg)?;

    // Bind to address
    let listener = tokio::net::TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .map_err(AppError::Bind)?;
    info!("listening on http://{}", cfg.address());

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
