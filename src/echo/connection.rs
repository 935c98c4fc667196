//! Echo loop for a single WebSocket connection.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use crate::app_state::EchoState;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Text frames are answered with [`EchoState::reply_for`].
/// - Binary frames are echoed unchanged.
/// - The loop ends on Close, end of stream, or any read/write error.
pub async fn run_connection(socket: WebSocket, state: EchoState) {
    let conn_id = uuid::Uuid::new_v4();
    let _guard = state.connection_opened();
    tracing::info!(%conn_id, "ws connection opened");

    let (mut ws_tx, mut ws_rx) = socket.split();

    while let Some(msg) = ws_rx.next().await {
        let reply = match msg {
            Ok(Message::Text(text)) => {
                let reply = state.reply_for(text.as_str());
                tracing::info!(%conn_id, received = %text.as_str(), sending = %reply, "echoing text frame");
                Message::text(reply)
            }
            Ok(Message::Binary(data)) => {
                tracing::info!(%conn_id, len = data.len(), "echoing binary frame");
                Message::Binary(data)
            }
            Ok(Message::Close(_)) => {
                tracing::info!(%conn_id, "client disconnected");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(%conn_id, error = %e, "error receiving message");
                break;
            }
        };

        // Counted before sending so a client holding the reply always sees it.
        state.record_echo();
        if let Err(e) = ws_tx.send(reply).await {
            tracing::warn!(%conn_id, error = %e, "error sending message");
            break;
        }
    }

    tracing::debug!(%conn_id, "ws connection closed");
}
