//! Probe error types.
//!
//! [`ProbeError`] covers every way a probe run can fail. All variants are
//! transport-level: nothing here is retried or recovered from, the probe
//! binary surfaces the error at the process boundary.

use tokio_tungstenite::tungstenite;

/// Failure of a single probe run.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The configured target is not a `ws://` URI.
    #[error("invalid websocket url: {0}")]
    InvalidUrl(String),

    /// TCP connect or WebSocket handshake failed (includes connection refused).
    #[error("failed to connect to {url}: {source}")]
    Connect {
        /// Target that was being connected to.
        url: String,
        /// Underlying transport error.
        #[source]
        source: Box<tungstenite::Error>,
    },

    /// Sending the outbound frame failed.
    #[error("failed to send frame: {0}")]
    Send(#[source] Box<tungstenite::Error>),

    /// Reading the inbound frame failed.
    #[error("failed to receive frame: {0}")]
    Receive(#[source] Box<tungstenite::Error>),

    /// The peer closed the connection before sending a data frame.
    #[error("connection closed before a reply arrived{}", close_reason_suffix(.reason))]
    ConnectionClosed {
        /// Close reason from the peer's Close frame, if any.
        reason: Option<String>,
    },

    /// Writing the exchange to the output sink failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ProbeError {
    /// Wraps a handshake failure for `url`.
    pub(crate) fn connect(url: &str, source: tungstenite::Error) -> Self {
        Self::Connect {
            url: url.to_string(),
            source: Box::new(source),
        }
    }

    /// Returns `true` if the failure happened before the connection was up.
    #[must_use]
    pub const fn is_connect(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::Connect { .. })
    }
}

/// Formats an optional close reason as `": reason"`.
fn close_reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {r}"))
        .unwrap_or_default()
}
