//! Router configuration and server setup.

use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;

use codecrew_core::ServerConfig;

use crate::handlers;
use crate::state::AppState;

/// Creates the router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Page
        .route("/", get(handlers::index))
        // API
        .route("/api/health", get(handlers::health))
        .route("/api/review", post(handlers::review))
        .with_state(state)
}

/// Starts the server and runs until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), std::io::Error> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Review page available at http://{}", addr);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
