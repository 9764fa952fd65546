//! Connectivity state of the transport.

/// The lifecycle state of the server connection.
///
/// Owned exclusively by the transport; every other component only observes
/// it. There is no error state — an error on the socket immediately forces
/// [`Closed`](ConnectivityState::Closed), and the reconnect loop takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    /// A connection attempt is in progress (including the very first one).
    Connecting,
    /// The WebSocket is established and frames may arrive.
    Open,
    /// The connection is down; the reconnect loop is waiting to retry.
    Closed,
}

impl ConnectivityState {
    pub fn is_open(self) -> bool {
        matches!(self, ConnectivityState::Open)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
