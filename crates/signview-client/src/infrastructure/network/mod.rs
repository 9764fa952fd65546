//! Network infrastructure for the display client.
//!
//! Maintains the persistent WebSocket connection to the signage server and
//! dispatches inbound frames to the application layer.
//!
//! Architecture:
//! - `ServerConnection` owns the socket and the reconnect loop.
//! - Inbound text frames are decoded and forwarded on an `mpsc` channel.
//! - Connectivity transitions are forwarded as events on the same channel,
//!   so the dispatch loop sees opens, closes, and frames strictly in order.
//!
//! Transport failures are never fatal to the process: every close or error
//! degrades to the `Closed` state and is retried after a fixed backoff,
//! forever. Delivery is at-most-once; a frame lost mid-drop simply means
//! stale content persists until the next push.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use signview_core::{decode_frame, ServerMessage};
use tokio::{net::TcpStream, sync::mpsc, time};
use tokio_tungstenite::{
    connect_async, tungstenite::protocol::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, info, warn};

use crate::domain::config::ClientConfig;
use crate::domain::connectivity::ConnectivityState;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Configuration for the transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Full WebSocket URL of the server endpoint.
    pub url: String,
    /// Fixed backoff between reconnect attempts.
    pub reconnect_interval: Duration,
    /// Tear the connection down if nothing arrives within this window.
    pub idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

impl From<&ClientConfig> for TransportConfig {
    fn from(cfg: &ClientConfig) -> Self {
        Self {
            url: cfg.ws_url(),
            reconnect_interval: cfg.reconnect_interval,
            idle_timeout: cfg.idle_timeout,
        }
    }
}

/// Events emitted by the transport to the application layer.
#[derive(Debug)]
pub enum NetworkEvent {
    /// The WebSocket connection was established.
    Connected,
    /// The connection was lost or a connect attempt failed; the reconnect
    /// loop is already scheduled. Close and error both land here — there is
    /// no separate error-recovery path.
    Disconnected,
    /// A decoded frame arrived from the server.
    FrameReceived(ServerMessage),
}

/// Manages the WebSocket connection from the terminal to the signage server.
pub struct ServerConnection {
    config: TransportConfig,
    state: Mutex<ConnectivityState>,
}

impl ServerConnection {
    /// Creates a new (not yet connected) `ServerConnection`.
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ConnectivityState::Connecting),
        }
    }

    /// The current connectivity state. Owned by the transport; everyone else
    /// only observes.
    pub fn connectivity(&self) -> ConnectivityState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, next: ConnectivityState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// Connects to the server and begins reading frames.
    ///
    /// Returns a channel receiver that delivers [`NetworkEvent`]s in arrival
    /// order. Runs a continuous reconnect loop until `running` is cleared or
    /// the receiver is dropped.
    pub async fn start(self: Arc<Self>, running: Arc<AtomicBool>) -> mpsc::Receiver<NetworkEvent> {
        let (tx, rx) = mpsc::channel(128);
        let this = Arc::clone(&self);

        tokio::spawn(async move {
            while running.load(Ordering::Relaxed) {
                // A dropped receiver means the session is over (reload or
                // shutdown); do not dial again on its behalf.
                if tx.is_closed() {
                    this.set_state(ConnectivityState::Closed);
                    return;
                }
                this.set_state(ConnectivityState::Connecting);

                match connect_async(&this.config.url).await {
                    Ok((socket, _response)) => {
                        info!("connected to signage server at {}", this.config.url);
                        this.set_state(ConnectivityState::Open);
                        if tx.send(NetworkEvent::Connected).await.is_err() {
                            return;
                        }

                        let (write, read) = socket.split();
                        this.read_loop(write, read, &tx).await;

                        this.set_state(ConnectivityState::Closed);
                        if tx.send(NetworkEvent::Disconnected).await.is_err() {
                            return;
                        }
                        info!(
                            "connection lost; reconnecting in {:?}",
                            this.config.reconnect_interval
                        );
                    }
                    Err(e) => {
                        // A failed attempt is a Closed transition too: the
                        // terminal must show its indicator even if it never
                        // managed to connect in the first place.
                        this.set_state(ConnectivityState::Closed);
                        warn!("could not connect to {}: {e}", this.config.url);
                        if tx.send(NetworkEvent::Disconnected).await.is_err() {
                            return;
                        }
                    }
                }

                if running.load(Ordering::Relaxed) {
                    time::sleep(this.config.reconnect_interval).await;
                }
            }
        });

        rx
    }

    /// Reads frames from the socket and forwards them on `tx`.
    ///
    /// Returns when the connection dies for any reason: remote close, read
    /// error, or the idle window elapsing with no traffic at all (the server
    /// pings well within it, so silence means the far side is gone even if
    /// TCP has not noticed).
    async fn read_loop(
        &self,
        mut write: SplitSink<Socket, Message>,
        mut read: SplitStream<Socket>,
        tx: &mpsc::Sender<NetworkEvent>,
    ) {
        loop {
            let item = match time::timeout(self.config.idle_timeout, read.next()).await {
                Err(_) => {
                    warn!(
                        "no traffic for {:?}; presuming server dead",
                        self.config.idle_timeout
                    );
                    break;
                }
                Ok(None) => {
                    debug!("server closed the stream");
                    break;
                }
                Ok(Some(Err(e))) => {
                    warn!("read error on server connection: {e}");
                    break;
                }
                Ok(Some(Ok(msg))) => msg,
            };

            match item {
                Message::Text(raw) => match decode_frame(&raw) {
                    Ok(frame) => {
                        debug!("received frame: {:?}", std::mem::discriminant(&frame));
                        if tx.send(NetworkEvent::FrameReceived(frame)).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        // Bad frames are discarded, never surfaced: one
                        // skipped update beats a wedged terminal.
                        warn!("discarding undecodable frame: {e}");
                    }
                },
                Message::Ping(payload) => {
                    debug!("ping from server");
                    if write.send(Message::Pong(payload)).await.is_err() {
                        break;
                    }
                }
                Message::Close(frame) => {
                    debug!("close frame from server: {frame:?}");
                    break;
                }
                _ => {}
            }
        }

        let _ = write.close().await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
