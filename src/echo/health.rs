//! Health endpoint for the echo server.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::app_state::EchoState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the server answers.
    pub status: String,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Connections currently open.
    pub active_connections: usize,
    /// Connections accepted since startup.
    pub total_connections: u64,
    /// Data frames replied to since startup.
    pub messages_echoed: u64,
}

/// `GET /health` — Service health status and counters.
pub async fn health_handler(State(state): State<EchoState>) -> impl IntoResponse {
    let snap = state.snapshot();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            active_connections: snap.active_connections,
            total_connections: snap.total_connections,
            messages_echoed: snap.messages_echoed,
        }),
    )
}

/// Health routes mounted at the root level.
pub fn routes() -> Router<EchoState> {
    Router::new().route("/health", get(health_handler))
}
