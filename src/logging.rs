//! Tracing subscriber setup shared by both binaries.
//!
//! Output goes to stderr so the probe's stdout carries only its report.
//! `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` selects the
//! JSON formatter.

use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. A second call is a no-op.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let _ = if json_requested(std::env::var("LOG_FORMAT").ok().as_deref()) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Returns `true` for `LOG_FORMAT=json` (case-insensitive).
fn json_requested(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.eq_ignore_ascii_case("json"))
}
