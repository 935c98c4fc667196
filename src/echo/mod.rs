//! Companion echo server.
//!
//! Accepts WebSocket upgrades at `/` and answers every text frame with the
//! same text plus the configured suffix. `GET /health` reports counters.

pub mod connection;
pub mod handler;
pub mod health;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::EchoState;
use handler::ws_handler;

/// Builds the echo router with the WebSocket and health endpoints.
pub fn build_router(state: EchoState) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the echo router on an already bound listener.
///
/// # Errors
///
/// Returns an I/O error if the accept loop fails.
pub async fn serve(listener: TcpListener, state: EchoState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "echo server listening");
    }
    axum::serve(listener, build_router(state)).await
}
