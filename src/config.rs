//! Probe and echo-server configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every key is optional; with nothing
//! set the probe targets `ws://127.0.0.1:8008` and sends
//! `Hello WebSocket!`.

use std::net::SocketAddr;

use tokio_tungstenite::tungstenite::http::Uri;

use crate::error::ProbeError;

/// Default probe target.
pub const DEFAULT_PROBE_URL: &str = "ws://127.0.0.1:8008";

/// Default outbound probe payload.
pub const DEFAULT_PROBE_MESSAGE: &str = "Hello WebSocket!";

/// Default echo-server bind address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8008";

/// Configuration for a single probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// WebSocket URI to connect to (`ws://` only; no TLS support is built in).
    pub url: String,

    /// Text payload sent as the single outbound frame.
    pub message: String,
}

impl ProbeConfig {
    /// Builds a configuration after validating the target URI.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidUrl`] if `url` does not parse as a URI
    /// or its scheme is not `ws`.
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Result<Self, ProbeError> {
        let url = url.into();
        validate_ws_url(&url)?;
        Ok(Self {
            url,
            message: message.into(),
        })
    }

    /// Loads configuration from `PROBE_URL` and `PROBE_MESSAGE`.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidUrl`] if `PROBE_URL` is set to
    /// something that is not a WebSocket URI.
    pub fn from_env() -> Result<Self, ProbeError> {
        dotenvy::dotenv().ok();

        let url =
            std::env::var("PROBE_URL").unwrap_or_else(|_| DEFAULT_PROBE_URL.to_string());
        let message =
            std::env::var("PROBE_MESSAGE").unwrap_or_else(|_| DEFAULT_PROBE_MESSAGE.to_string());

        Self::new(url, message)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PROBE_URL.to_string(),
            message: DEFAULT_PROBE_MESSAGE.to_string(),
        }
    }
}

/// Configuration for the companion echo server.
#[derive(Debug, Clone)]
pub struct EchoServerConfig {
    /// Socket address to bind to.
    pub listen_addr: SocketAddr,

    /// Appended to every text reply. Empty means a verbatim echo.
    pub reply_suffix: String,
}

impl EchoServerConfig {
    /// Loads configuration from `LISTEN_ADDR` and `ECHO_REPLY_SUFFIX`.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()?;

        let reply_suffix = std::env::var("ECHO_REPLY_SUFFIX").unwrap_or_default();

        Ok(Self {
            listen_addr,
            reply_suffix,
        })
    }
}

/// Checks that `url` is a URI with a `ws` scheme and a host.
///
/// `wss` is refused here: the client is built without a TLS backend, so
/// such a target could never complete the handshake.
fn validate_ws_url(url: &str) -> Result<(), ProbeError> {
    let uri: Uri = url
        .parse()
        .map_err(|_| ProbeError::InvalidUrl(url.to_string()))?;

    match (uri.scheme_str(), uri.host()) {
        (Some("ws"), Some(_)) => Ok(()),
        _ => Err(ProbeError::InvalidUrl(url.to_string())),
    }
}
