//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::EchoState;

/// `GET /` — Upgrade HTTP connection to WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<EchoState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| run_connection(socket, state))
}
