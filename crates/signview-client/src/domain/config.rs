//! Client configuration types.
//!
//! [`ClientConfig`] is the single source of truth for all runtime settings.
//! It is constructed from CLI arguments (with environment variable overrides)
//! or from defaults suitable for local development and tests.
//!
//! Keeping configuration as a plain struct — no global state, no environment
//! variable reads inside the domain — makes the client easy to embed in
//! tests. The binary entry point is responsible for populating the struct.

use std::time::Duration;

/// All runtime configuration for the display client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host (and optional port) of the signage server, e.g. `"10.0.0.5:8040"`.
    ///
    /// The WebSocket endpoint is always derived as `ws://<server_host>/ws`;
    /// there is no separate endpoint setting. A terminal always talks to the
    /// server that provisioned it.
    pub server_host: String,

    /// Fixed backoff between reconnect attempts when the connection drops.
    ///
    /// The retry count is unbounded on purpose: the deployment target is a
    /// long-lived unattended terminal, so giving up is never correct.
    pub reconnect_interval: Duration,

    /// How long the connection may stay silent before the server is presumed
    /// dead and the connection is torn down and re-established.
    ///
    /// The server pings well within this window, so an idle link means the
    /// far side is gone even if TCP has not noticed yet.
    pub idle_timeout: Duration,

    /// Local asset shown on the image surface while disconnected.
    ///
    /// Must be renderable with no network connection at all.
    pub disconnected_asset: String,
}

impl ClientConfig {
    /// The WebSocket URL the transport connects to.
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.server_host)
    }
}

impl Default for ClientConfig {
    /// Returns a `ClientConfig` suitable for local development: a signage
    /// server on localhost, 5-second reconnect backoff, 20-second idle
    /// window, and the stock disconnected indicator.
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1:8040".to_string(),
            reconnect_interval: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(20),
            disconnected_asset: "/disconnected.png".to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
