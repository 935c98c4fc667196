//! End-to-end probe runs against a local echo server.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_test::{assert_err, assert_ok};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use echo_probe::app_state::EchoState;
use echo_probe::config::ProbeConfig;
use echo_probe::echo;
use echo_probe::error::ProbeError;
use echo_probe::probe::EchoProbe;

async fn spawn_echo_server(state: EchoState) -> SocketAddr {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(echo::serve(listener, state));
    addr
}

/// Waits until the server has released every connection.
async fn wait_until_idle(state: &EchoState) -> bool {
    for _ in 0..100 {
        if state.snapshot().active_connections == 0 {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

fn probe_for(addr: SocketAddr) -> EchoProbe {
    let Ok(config) = ProbeConfig::new(format!("ws://{addr}"), "Hello WebSocket!") else {
        panic!("valid config");
    };
    EchoProbe::new(config)
}

#[tokio::test]
async fn echo_server_round_trip_prints_two_lines() {
    let addr = spawn_echo_server(EchoState::default()).await;

    let mut out = Vec::new();
    let exchange = assert_ok!(probe_for(addr).run(&mut out).await);

    assert!(exchange.is_echo());
    assert_eq!(exchange.received, "Hello WebSocket!");
    assert_eq!(
        String::from_utf8_lossy(&out),
        "Sent: Hello WebSocket!\nReceived: Hello WebSocket!\n"
    );
}

#[tokio::test]
async fn probe_sends_exactly_one_frame() {
    let state = EchoState::default();
    let addr = spawn_echo_server(state.clone()).await;

    let mut out = Vec::new();
    assert_ok!(probe_for(addr).run(&mut out).await);

    let snap = state.snapshot();
    assert_eq!(snap.messages_echoed, 1);
    assert_eq!(snap.total_connections, 1);
}

#[tokio::test]
async fn successful_run_releases_server_connection() {
    let state = EchoState::default();
    let addr = spawn_echo_server(state.clone()).await;

    let mut out = Vec::new();
    assert_ok!(probe_for(addr).run(&mut out).await);

    assert!(
        wait_until_idle(&state).await,
        "server still holds the connection after the run"
    );
    assert_eq!(state.snapshot().total_connections, 1);
}

#[tokio::test]
async fn suffix_server_reply_is_reported_verbatim() {
    let addr = spawn_echo_server(EchoState::new("modified")).await;

    let mut out = Vec::new();
    let exchange = assert_ok!(probe_for(addr).run(&mut out).await);

    assert!(!exchange.is_echo());
    assert_eq!(exchange.received, "Hello WebSocket!modified");
    assert_eq!(
        String::from_utf8_lossy(&out),
        "Sent: Hello WebSocket!\nReceived: Hello WebSocket!modified\n"
    );
}

#[tokio::test]
async fn no_listener_is_connect_error_without_output() {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    drop(listener);

    let mut out = Vec::new();
    let err = assert_err!(probe_for(addr).run(&mut out).await);

    assert!(matches!(err, ProbeError::Connect { .. }));
    assert!(!String::from_utf8_lossy(&out).contains("Received"));
}

#[tokio::test]
async fn peer_closing_before_reply_leaves_only_sent_line() {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };

    // Reads one frame, closes without replying, then reports whether the
    // client answered with its own Close frame.
    let (saw_close_tx, saw_close_rx) = oneshot::channel();
    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(mut ws) = accept_async(stream).await else {
            return;
        };
        let _ = ws.next().await;
        let _ = ws.close(None).await;

        let mut saw_close = false;
        while let Ok(Some(Ok(msg))) =
            tokio::time::timeout(Duration::from_secs(2), ws.next()).await
        {
            if matches!(msg, Message::Close(_)) {
                saw_close = true;
                break;
            }
        }
        let _ = saw_close_tx.send(saw_close);
    });

    let mut out = Vec::new();
    let err = assert_err!(probe_for(addr).run(&mut out).await);

    assert!(matches!(err, ProbeError::ConnectionClosed { .. }));
    assert_eq!(String::from_utf8_lossy(&out), "Sent: Hello WebSocket!\n");

    let Ok(saw_close) = saw_close_rx.await else {
        panic!("peer task ended without reporting");
    };
    assert!(saw_close, "client did not complete the closing handshake");
}
