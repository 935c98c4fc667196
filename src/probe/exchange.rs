//! The sent/received pair produced by one probe run.

/// One completed message exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Payload sent as the outbound text frame.
    pub sent: String,
    /// Payload of the first inbound data frame.
    pub received: String,
}

impl Exchange {
    /// Returns `true` if the peer echoed the payload verbatim.
    #[must_use]
    pub fn is_echo(&self) -> bool {
        self.sent == self.received
    }
}

/// Console line reporting the outbound payload.
#[must_use]
pub fn sent_line(payload: &str) -> String {
    format!("Sent: {payload}")
}

/// Console line reporting the inbound payload.
#[must_use]
pub fn received_line(payload: &str) -> String {
    format!("Received: {payload}")
}
