//! DisplaySync: the protocol state machine driven by transport events.
//!
//! Combines the content router, the version guard, and the connectivity
//! fallback into one use case with three entry points, mirroring the three
//! things the transport can report: the link opened, the link closed, or a
//! frame arrived. All three run on the single event-processing path, so each
//! handler runs to completion before the next event — the router's
//! hide-then-show sequencing is atomic for free.

use std::sync::Arc;

use signview_core::ServerMessage;
use tracing::{debug, info};

use crate::application::route_content::{ContentRouter, RenderError, RenderSurfaces};
use crate::application::version_guard::{ReloadHandle, VersionGuard, VersionOutcome};

/// What a processed frame asks of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was applied (or was a no-op); keep dispatching.
    Applied,
    /// The server's fingerprint changed; tear everything down and reload.
    ReloadRequested,
}

/// The display synchronization use case.
pub struct DisplaySync {
    router: ContentRouter,
    guard: VersionGuard,
}

impl DisplaySync {
    /// Builds the state machine and blanks every surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the backend cannot establish the initial
    /// all-hidden state — a client whose surfaces are missing at startup must
    /// refuse to proceed rather than guess.
    pub fn new(
        surfaces: Arc<dyn RenderSurfaces>,
        disconnected_asset: impl Into<String>,
        reload: Arc<dyn ReloadHandle>,
    ) -> Result<Self, RenderError> {
        let mut router = ContentRouter::new(surfaces, disconnected_asset);
        router.reset()?;
        Ok(Self {
            router,
            guard: VersionGuard::new(reload),
        })
    }

    /// The transport established a connection.
    ///
    /// Deliberately no render action: an open link does not mean the server
    /// has anything new to say yet, so the previous content (or the
    /// disconnected indicator) stays visible until the next real frame.
    pub fn on_transport_open(&self) {
        info!("connected to signage server");
    }

    /// The transport lost the connection (close or error, any cause).
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the indicator could not be shown; callers
    /// log and continue, because the reconnect loop is already running.
    pub fn on_transport_closed(&mut self) -> Result<(), RenderError> {
        self.router.show_disconnected()
    }

    /// One decoded frame arrived.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the backend rejects a content transition.
    /// The frame is then considered consumed; stale content persisting until
    /// the next push is the accepted failure mode.
    pub fn on_frame(&mut self, msg: ServerMessage) -> Result<FrameOutcome, RenderError> {
        match msg {
            ServerMessage::Disconnected(_) => {
                // Same asset as a transport-level drop, by way of the same
                // router primitive.
                debug!("server pushed Disconnected; showing idle indicator");
                self.router.show_disconnected()?;
                Ok(FrameOutcome::Applied)
            }
            ServerMessage::Display(payload) => {
                debug!("activating {:?} surface", payload.kind());
                self.router.activate(payload.kind(), payload.content())?;
                Ok(FrameOutcome::Applied)
            }
            ServerMessage::Hash(hash) => match self.guard.observe(&hash) {
                VersionOutcome::Mismatch => Ok(FrameOutcome::ReloadRequested),
                VersionOutcome::BaselineSet | VersionOutcome::Match => Ok(FrameOutcome::Applied),
            },
        }
    }

    /// Read access to the router, for observers (tests, status reporting).
    pub fn router(&self) -> &ContentRouter {
        &self.router
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
