//! echo-server entry point.
//!
//! Starts the Axum server that the probe talks to.

use anyhow::Context;

use echo_probe::app_state::EchoState;
use echo_probe::config::EchoServerConfig;
use echo_probe::{echo, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("info");

    let config = EchoServerConfig::from_env().context("invalid LISTEN_ADDR")?;
    tracing::info!(
        addr = %config.listen_addr,
        suffix = %config.reply_suffix,
        "starting echo server"
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    echo::serve(listener, EchoState::new(&config.reply_suffix))
        .await
        .context("echo server failed")?;

    Ok(())
}
