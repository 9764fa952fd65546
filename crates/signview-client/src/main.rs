//! SignView display client — entry point.
//!
//! Wires together the transport, the display-sync state machine, and the
//! render backend, then runs the event dispatch loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ outer reload loop            -- one iteration per client lifetime
//!      └─ run_session()
//!          ├─ DisplaySync::new()    -- blanks surfaces, fresh fingerprint
//!          ├─ ServerConnection::start() -- WebSocket reconnect loop
//!          └─ event dispatch loop
//!               ├─ Connected        -> no render action
//!               ├─ Disconnected     -> show disconnected indicator
//!               └─ FrameReceived    -> route content / observe fingerprint
//! ```
//!
//! A version-fingerprint mismatch ends the session and the outer loop starts
//! a fresh one — the in-process equivalent of a kiosk's full page reload.
//! Everything (router target, fingerprint baseline, connection) is discarded
//! and rebuilt; a plain reconnect, by contrast, keeps the baseline.
//!
//! # Render backend
//!
//! The `HeadlessSurfaces` backend used here traces transitions rather than
//! drawing. In a kiosk deployment the webview binding implements the same
//! `RenderSurfaces` trait and is injected in its place.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::Notify;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use signview_client::application::route_content::RenderSurfaces;
use signview_client::application::sync_display::{DisplaySync, FrameOutcome};
use signview_client::application::version_guard::ReloadHandle;
use signview_client::domain::config::ClientConfig;
use signview_client::infrastructure::network::{NetworkEvent, ServerConnection, TransportConfig};
use signview_client::infrastructure::reload::ReloadFlag;
use signview_client::infrastructure::surfaces::headless::HeadlessSurfaces;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// SignView display synchronization client.
///
/// Keeps one unattended terminal in sync with the central signage server
/// over a persistent WebSocket connection.
#[derive(Debug, Parser)]
#[command(
    name = "signview-client",
    about = "Display synchronization client for unattended signage terminals",
    version
)]
struct Cli {
    /// Host (and optional port) of the signage server.
    ///
    /// The WebSocket endpoint is always derived as ws://HOST/ws.
    #[arg(long, default_value = "127.0.0.1:8040", env = "SIGNVIEW_SERVER_HOST")]
    server_host: String,

    /// Fixed backoff between reconnect attempts, in seconds.
    #[arg(long, default_value_t = 5, env = "SIGNVIEW_RECONNECT_INTERVAL")]
    reconnect_interval: u64,

    /// Idle window in seconds after which a silent connection is presumed
    /// dead and re-established.
    #[arg(long, default_value_t = 20, env = "SIGNVIEW_IDLE_TIMEOUT")]
    idle_timeout: u64,

    /// Local asset shown on the image surface while disconnected.
    #[arg(long, default_value = "/disconnected.png", env = "SIGNVIEW_DISCONNECTED_ASSET")]
    disconnected_asset: String,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the server host or the disconnected asset path is
    /// blank — an unattended terminal cannot ask anyone to fix its flags, so
    /// it refuses to start with observably broken settings.
    fn into_client_config(self) -> anyhow::Result<ClientConfig> {
        if self.server_host.trim().is_empty() {
            anyhow::bail!("--server-host must not be empty");
        }
        if self.disconnected_asset.trim().is_empty() {
            anyhow::bail!("--disconnected-asset must not be empty");
        }

        Ok(ClientConfig {
            server_host: self.server_host,
            reconnect_interval: Duration::from_secs(self.reconnect_interval),
            idle_timeout: Duration::from_secs(self.idle_timeout),
            disconnected_asset: self.disconnected_asset,
        })
    }
}

// ── Session lifecycle ─────────────────────────────────────────────────────────

/// Why a session ended.
enum SessionEnd {
    /// The server's build fingerprint changed; start a fresh session.
    Reload,
    /// Shutdown was requested or the event stream ended.
    Shutdown,
}

/// Runs one client lifetime: fresh state machine, fresh connection, and the
/// event dispatch loop, until a reload is requested or shutdown begins.
async fn run_session(
    config: &ClientConfig,
    surfaces: Arc<dyn RenderSurfaces>,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
) -> anyhow::Result<SessionEnd> {
    let reload_flag = Arc::new(ReloadFlag::new());
    let mut sync = DisplaySync::new(
        surfaces,
        config.disconnected_asset.clone(),
        Arc::clone(&reload_flag) as Arc<dyn ReloadHandle>,
    )
    .context("render backend failed to initialize; refusing to start")?;

    let connection = Arc::new(ServerConnection::new(TransportConfig::from(config)));
    let mut events = connection.start(Arc::clone(&running)).await;

    loop {
        // A healthy idle connection produces no events (pings are answered
        // inside the transport), so shutdown must not wait for the next one.
        let event = tokio::select! {
            _ = shutdown.notified() => break,
            maybe_event = events.recv() => match maybe_event {
                Some(event) => event,
                None => break,
            },
        };
        if !running.load(Ordering::Relaxed) {
            break;
        }

        match event {
            NetworkEvent::Connected => sync.on_transport_open(),

            NetworkEvent::Disconnected => {
                warn!("connection down; showing disconnected indicator");
                if let Err(e) = sync.on_transport_closed() {
                    error!("could not show disconnected indicator: {e}");
                }
            }

            NetworkEvent::FrameReceived(msg) => match sync.on_frame(msg) {
                Ok(FrameOutcome::ReloadRequested) => {
                    // Consume the flag so a stale request cannot leak into
                    // the next session.
                    let _ = reload_flag.take();
                    return Ok(SessionEnd::Reload);
                }
                Ok(FrameOutcome::Applied) => {}
                Err(e) => {
                    // Stale content until the next push is the accepted
                    // failure mode; the terminal carries on.
                    error!("render backend rejected update: {e}");
                }
            },
        }
    }

    Ok(SessionEnd::Shutdown)
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging; level via RUST_LOG, default info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.into_client_config()?;

    info!(
        "SignView client starting — server={}, endpoint={}",
        config.server_host,
        config.ws_url()
    );

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let shutdown = Arc::new(Notify::new());
    let running_clone = Arc::clone(&running);
    let shutdown_clone = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
            // notify_one stores a permit, so the signal is not lost even if
            // the dispatch loop is between select polls.
            shutdown_clone.notify_one();
        }
    });

    let surfaces: Arc<dyn RenderSurfaces> = Arc::new(HeadlessSurfaces::new());

    // ── Outer reload loop ─────────────────────────────────────────────────────
    // Each iteration is one full client lifetime; a fingerprint mismatch is
    // the only way to get here more than once.
    loop {
        match run_session(
            &config,
            Arc::clone(&surfaces),
            Arc::clone(&running),
            Arc::clone(&shutdown),
        )
        .await?
        {
            SessionEnd::Reload => {
                info!("performing full client reload");
            }
            SessionEnd::Shutdown => break,
        }
    }

    info!("SignView client stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
