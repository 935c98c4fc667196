//! # echo-probe
//!
//! Single-shot WebSocket connectivity check plus the echo server it is
//! meant to talk to.
//!
//! The probe opens one connection to `ws://127.0.0.1:8008`, sends
//! `Hello WebSocket!` as a text frame, waits for one reply and prints
//!
//! ```text
//! Sent: Hello WebSocket!
//! Received: Hello WebSocket!
//! ```
//!
//! ## Architecture
//!
//! ```text
//! echo-probe (bin)              echo-server (bin)
//!     │                              │
//!     ├── ProbeConfig (config/)      ├── EchoServerConfig (config/)
//!     ├── EchoProbe (probe/)  ──ws──▶├── Router (echo/)
//!     │     └── Exchange             │     ├── GET /        upgrade + echo loop
//!     └── ProbeError (error/)        │     └── GET /health
//!                                    └── EchoState (app_state/)
//! ```

pub mod app_state;
pub mod config;
pub mod echo;
pub mod error;
pub mod logging;
pub mod probe;
