//! echo-probe entry point.
//!
//! Sends one message to the configured WebSocket endpoint and prints the
//! exchange. Any failure terminates the process with a non-zero status.

use echo_probe::config::ProbeConfig;
use echo_probe::logging;
use echo_probe::probe::EchoProbe;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("warn");

    let probe = EchoProbe::new(ProbeConfig::from_env()?);
    tracing::info!(url = %probe.config().url, "starting echo probe");

    let exchange = match probe.run(&mut std::io::stdout()).await {
        Ok(exchange) => exchange,
        Err(err) => {
            tracing::error!(error = %err, before_connect = err.is_connect(), "probe failed");
            return Err(err.into());
        }
    };
    tracing::info!(echo = exchange.is_echo(), "probe finished");

    Ok(())
}
