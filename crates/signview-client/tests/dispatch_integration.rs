//! Integration tests for the display synchronization pipeline.
//!
//! # Purpose
//!
//! These tests run a real in-process WebSocket server that pushes frames the
//! way the signage server does, and drive the full path the binary uses:
//!
//! ```text
//! push server ── ws text frame ──> ServerConnection (transport)
//!                                    │ decode_frame
//!                                    ▼
//!                               NetworkEvent ──> DisplaySync
//!                                                  │
//!                                                  ▼
//!                                         RecordingSurfaces
//! ```
//!
//! They verify the externally observable contract:
//!
//! - A pushed `Display` frame ends with exactly one surface visible.
//! - A transport-level close shows the disconnected asset even though no
//!   `Disconnected` frame was ever sent.
//! - A changed build fingerprint requests a reload exactly once.
//! - Undecodable frames are dropped by the transport and never reach the
//!   state machine.
//!
//! The event handling in [`Harness::step`] mirrors the dispatch loop in the
//! binary one-to-one, so these tests exercise the same control flow.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::protocol::Message};

use signview_client::application::route_content::RenderSurfaces;
use signview_client::application::sync_display::{DisplaySync, FrameOutcome};
use signview_client::application::version_guard::ReloadHandle;
use signview_client::infrastructure::network::{NetworkEvent, ServerConnection, TransportConfig};
use signview_client::infrastructure::reload::ReloadFlag;
use signview_client::infrastructure::surfaces::mock::RecordingSurfaces;
use signview_core::{encode_frame, ContentKind, DisplayPayload, MediaPayload, ServerMessage};

/// Overall guard so a wedged pipeline fails the test instead of hanging CI.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Starts a WebSocket server that accepts one connection, pushes the given
/// raw text frames in order, then closes the connection.
async fn spawn_push_server(frames: Vec<String>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        for frame in frames {
            ws.send(Message::Text(frame)).await.unwrap();
        }
        let _ = ws.close(None).await;
    });

    addr
}

fn frame(msg: &ServerMessage) -> String {
    encode_frame(msg).unwrap()
}

/// One processed dispatch step, for assertions.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Open,
    Closed,
    Frame(FrameOutcome),
}

/// The full client pipeline wired against the push server.
struct Harness {
    sync: DisplaySync,
    surfaces: Arc<RecordingSurfaces>,
    reload: Arc<ReloadFlag>,
    events: tokio::sync::mpsc::Receiver<NetworkEvent>,
    running: Arc<AtomicBool>,
}

impl Harness {
    async fn connect(addr: SocketAddr) -> Self {
        Self::connect_with_idle(addr, Duration::from_secs(5)).await
    }

    async fn connect_with_idle(addr: SocketAddr, idle_timeout: Duration) -> Self {
        let surfaces = Arc::new(RecordingSurfaces::new());
        let reload = Arc::new(ReloadFlag::new());
        let sync = DisplaySync::new(
            Arc::clone(&surfaces) as Arc<dyn RenderSurfaces>,
            "/disconnected.png",
            Arc::clone(&reload) as Arc<dyn ReloadHandle>,
        )
        .unwrap();

        let cfg = TransportConfig {
            url: format!("ws://{addr}/ws"),
            // Short backoff so tests that outlive one connection stay fast.
            reconnect_interval: Duration::from_millis(50),
            idle_timeout,
        };
        let running = Arc::new(AtomicBool::new(true));
        let events = Arc::new(ServerConnection::new(cfg))
            .start(Arc::clone(&running))
            .await;

        Self {
            sync,
            surfaces,
            reload,
            events,
            running,
        }
    }

    /// Processes one network event exactly the way the binary's dispatch
    /// loop does.
    async fn step(&mut self) -> Option<Step> {
        let event = self.events.recv().await?;
        Some(match event {
            NetworkEvent::Connected => {
                self.sync.on_transport_open();
                Step::Open
            }
            NetworkEvent::Disconnected => {
                self.sync.on_transport_closed().unwrap();
                Step::Closed
            }
            NetworkEvent::FrameReceived(msg) => Step::Frame(self.sync.on_frame(msg).unwrap()),
        })
    }

    /// Steps until the predicate accepts a processed step.
    async fn step_until(&mut self, mut accept: impl FnMut(&Step) -> bool) {
        while let Some(step) = self.step().await {
            if accept(&step) {
                return;
            }
        }
        panic!("event stream ended before the expected step");
    }

    fn shutdown(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

/// A pushed `Display` frame ends with exactly one surface visible, matching
/// the declared kind and carrying the declared payload.
#[tokio::test]
async fn test_display_push_renders_exactly_one_surface() {
    let addr = spawn_push_server(vec![
        frame(&ServerMessage::Hash("abc".into())),
        frame(&ServerMessage::Display(DisplayPayload::Image(
            MediaPayload::new("/a.png"),
        ))),
    ])
    .await;

    let mut harness = Harness::connect(addr).await;

    tokio::time::timeout(TEST_TIMEOUT, async {
        // Two frames: the Hash (no render effect) and the Display.
        let mut frames_seen = 0;
        harness
            .step_until(|step| {
                if matches!(step, Step::Frame(_)) {
                    frames_seen += 1;
                }
                frames_seen == 2
            })
            .await;
    })
    .await
    .expect("pipeline must deliver both frames");

    assert_eq!(harness.surfaces.visible_kinds(), vec![ContentKind::Image]);
    assert_eq!(
        harness.surfaces.content_of(ContentKind::Image).as_deref(),
        Some("/a.png")
    );
    harness.shutdown();
}

/// After the server closes the connection, the disconnected asset is visible
/// even though no `Disconnected` frame was ever sent.
#[tokio::test]
async fn test_transport_close_shows_disconnected_asset() {
    let addr = spawn_push_server(vec![frame(&ServerMessage::Display(DisplayPayload::Website(
        MediaPayload::new("https://example.org"),
    )))])
    .await;

    let mut harness = Harness::connect(addr).await;

    tokio::time::timeout(TEST_TIMEOUT, async {
        harness.step_until(|step| *step == Step::Closed).await;
    })
    .await
    .expect("transport must report the close");

    assert_eq!(harness.surfaces.visible_kinds(), vec![ContentKind::Image]);
    assert_eq!(
        harness.surfaces.content_of(ContentKind::Image).as_deref(),
        Some("/disconnected.png")
    );
    harness.shutdown();
}

/// A repeated fingerprint is a no-op; a changed one requests a reload
/// exactly once.
#[tokio::test]
async fn test_fingerprint_change_requests_reload_exactly_once() {
    let addr = spawn_push_server(vec![
        frame(&ServerMessage::Hash("abc".into())),
        frame(&ServerMessage::Hash("abc".into())),
        frame(&ServerMessage::Hash("def".into())),
    ])
    .await;

    let mut harness = Harness::connect(addr).await;

    tokio::time::timeout(TEST_TIMEOUT, async {
        harness
            .step_until(|step| *step == Step::Frame(FrameOutcome::ReloadRequested))
            .await;
    })
    .await
    .expect("the changed fingerprint must request a reload");

    // The reload flag was raised once and can be consumed exactly once, the
    // way the binary's session loop consumes it.
    assert!(harness.reload.take());
    assert!(!harness.reload.take());
    harness.shutdown();
}

/// Undecodable frames are dropped by the transport: they never reach the
/// state machine and the visible state is untouched by them.
#[tokio::test]
async fn test_malformed_frames_are_dropped_before_dispatch() {
    let addr = spawn_push_server(vec![
        "{this is not json".to_string(),
        r#"{"Announcement":"unknown tag"}"#.to_string(),
        frame(&ServerMessage::Display(DisplayPayload::Text(
            MediaPayload::new("<h1>still alive</h1>"),
        ))),
    ])
    .await;

    let mut harness = Harness::connect(addr).await;

    tokio::time::timeout(TEST_TIMEOUT, async {
        // The first dispatched frame is already the valid third one.
        harness
            .step_until(|step| matches!(step, Step::Frame(_)))
            .await;
    })
    .await
    .expect("the valid frame must still arrive");

    assert_eq!(harness.surfaces.visible_kinds(), vec![ContentKind::Text]);
    assert_eq!(
        harness.surfaces.content_of(ContentKind::Text).as_deref(),
        Some("<h1>still alive</h1>")
    );
    harness.shutdown();
}

/// A connection that stays up but silent past the idle window is presumed
/// dead and torn down, ending with the disconnected indicator.
#[tokio::test]
async fn test_silent_connection_is_torn_down_after_idle_window() {
    // Arrange – a server that accepts and then never sends anything.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = accept_async(stream).await.unwrap();
        // Keep the socket open well past the client's idle window.
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(ws);
    });

    let mut harness = Harness::connect_with_idle(addr, Duration::from_millis(100)).await;

    // Act / Assert – the client must give up on the silent link on its own.
    tokio::time::timeout(TEST_TIMEOUT, async {
        harness.step_until(|step| *step == Step::Open).await;
        harness.step_until(|step| *step == Step::Closed).await;
    })
    .await
    .expect("idle window must force a teardown");

    assert_eq!(harness.surfaces.visible_kinds(), vec![ContentKind::Image]);
    assert_eq!(
        harness.surfaces.content_of(ContentKind::Image).as_deref(),
        Some("/disconnected.png")
    );
    harness.shutdown();
}

/// A server `Ping` is answered with a `Pong` echoing the same payload, so
/// the server's liveness probing keeps working.
#[tokio::test]
async fn test_server_ping_is_answered_with_matching_pong() {
    // Arrange – a server that pings and reports the pong it gets back.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (pong_tx, pong_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::Ping(b"keepalive".to_vec())).await.unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            if let Message::Pong(payload) = msg {
                let _ = pong_tx.send(payload);
                break;
            }
        }
        let _ = ws.close(None).await;
    });

    let harness = Harness::connect(addr).await;

    // Act
    let payload = tokio::time::timeout(TEST_TIMEOUT, pong_rx)
        .await
        .expect("pong must arrive within the window")
        .expect("server task must observe the pong");

    // Assert – the pong echoes the ping payload byte for byte
    assert_eq!(payload, b"keepalive");
    harness.shutdown();
}
