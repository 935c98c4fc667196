//! Shared echo-server state injected into all Axum handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct EchoState {
    /// Appended to every text reply.
    reply_suffix: Arc<str>,
    /// Connection and message counters.
    stats: Arc<EchoStats>,
}

/// Server-wide counters.
#[derive(Debug, Default)]
pub struct EchoStats {
    active_connections: AtomicUsize,
    total_connections: AtomicU64,
    messages_echoed: AtomicU64,
}

/// Point-in-time copy of [`EchoStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Connections currently open.
    pub active_connections: usize,
    /// Connections accepted since startup.
    pub total_connections: u64,
    /// Data frames replied to since startup.
    pub messages_echoed: u64,
}

/// Marks one connection as active until dropped.
#[derive(Debug)]
pub struct ConnectionGuard {
    stats: Arc<EchoStats>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.stats.active_connections.fetch_sub(1, Ordering::Relaxed);
    }
}

impl EchoState {
    /// Creates state that replies with `text + reply_suffix`.
    #[must_use]
    pub fn new(reply_suffix: &str) -> Self {
        Self {
            reply_suffix: Arc::from(reply_suffix),
            stats: Arc::new(EchoStats::default()),
        }
    }

    /// Builds the reply for an incoming text frame.
    #[must_use]
    pub fn reply_for(&self, text: &str) -> String {
        let mut reply = String::with_capacity(text.len() + self.reply_suffix.len());
        reply.push_str(text);
        reply.push_str(&self.reply_suffix);
        reply
    }

    /// Registers a new connection. The returned guard releases it on drop.
    #[must_use]
    pub fn connection_opened(&self) -> ConnectionGuard {
        self.stats.active_connections.fetch_add(1, Ordering::Relaxed);
        self.stats.total_connections.fetch_add(1, Ordering::Relaxed);
        ConnectionGuard {
            stats: Arc::clone(&self.stats),
        }
    }

    /// Counts one replied data frame.
    pub fn record_echo(&self) {
        self.stats.messages_echoed.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            active_connections: self.stats.active_connections.load(Ordering::Relaxed),
            total_connections: self.stats.total_connections.load(Ordering::Relaxed),
            messages_echoed: self.stats.messages_echoed.load(Ordering::Relaxed),
        }
    }
}

impl Default for EchoState {
    fn default() -> Self {
        Self::new("")
    }
}
