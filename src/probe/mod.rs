//! Single-shot WebSocket echo probe.
//!
//! [`EchoProbe::run`] connects to the configured endpoint, sends one text
//! frame, waits for one data frame in reply, reports both and closes the
//! connection. The close is attempted on every path once the handshake
//! has succeeded.

pub mod exchange;

use std::io::Write;

use futures_util::{SinkExt, Stream, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

pub use exchange::{Exchange, received_line, sent_line};

use crate::config::ProbeConfig;
use crate::error::ProbeError;

/// Client-side WebSocket stream used by the probe.
type ProbeStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Sends one message to a WebSocket endpoint and reports the reply.
#[derive(Debug, Clone)]
pub struct EchoProbe {
    config: ProbeConfig,
}

impl EchoProbe {
    /// Creates a probe for the given configuration.
    #[must_use]
    pub const fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Returns the probe configuration.
    #[must_use]
    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Performs one exchange, writing `Sent:` and `Received:` lines to `out`.
    ///
    /// The `Sent:` line is written as soon as the outbound frame is on the
    /// wire, so a receive failure leaves exactly that one line behind.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Connect`] if the handshake fails,
    /// [`ProbeError::Send`] / [`ProbeError::Receive`] on transport
    /// failures, [`ProbeError::ConnectionClosed`] if the peer closes before
    /// replying and [`ProbeError::Output`] if `out` cannot be written.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<Exchange, ProbeError> {
        let url = self.config.url.as_str();
        tracing::debug!(%url, "connecting");

        let (mut ws, response) = connect_async(url)
            .await
            .map_err(|e| ProbeError::connect(url, e))?;
        tracing::debug!(%url, status = %response.status(), "websocket handshake complete");

        let result = self.exchange(&mut ws, out).await;

        if let Err(e) = ws.close(None).await {
            tracing::debug!(error = %e, "closing probe connection failed");
        }
        tracing::debug!(%url, ok = result.is_ok(), "probe connection closed");

        result
    }

    async fn exchange<W: Write>(
        &self,
        ws: &mut ProbeStream,
        out: &mut W,
    ) -> Result<Exchange, ProbeError> {
        let sent = self.config.message.clone();

        ws.send(Message::text(sent.clone()))
            .await
            .map_err(|e| ProbeError::Send(Box::new(e)))?;
        writeln!(out, "{}", sent_line(&sent))?;
        out.flush()?;

        let received = next_data_frame(ws).await?;
        writeln!(out, "{}", received_line(&received))?;
        out.flush()?;

        Ok(Exchange { sent, received })
    }
}

/// Waits for the next text or binary frame and returns its payload.
///
/// Control frames are skipped; tungstenite answers pings on its own.
/// Binary payloads are decoded as lossy UTF-8.
///
/// # Errors
///
/// Returns [`ProbeError::Receive`] on a read error and
/// [`ProbeError::ConnectionClosed`] if a Close frame or end of stream
/// arrives first.
pub async fn next_data_frame<S>(stream: &mut S) -> Result<String, ProbeError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Text(text)) => return Ok(text.as_str().to_owned()),
            Ok(Message::Binary(data)) => return Ok(String::from_utf8_lossy(&data).into_owned()),
            Ok(Message::Close(frame)) => {
                let reason = frame
                    .map(|f| f.reason.as_str().to_owned())
                    .filter(|r| !r.is_empty());
                return Err(ProbeError::ConnectionClosed { reason });
            }
            Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {
                tracing::trace!("skipping control frame");
            }
            Err(e) => return Err(ProbeError::Receive(Box::new(e))),
        }
    }

    Err(ProbeError::ConnectionClosed { reason: None })
}
