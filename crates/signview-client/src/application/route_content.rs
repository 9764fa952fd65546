//! ContentRouter: activates exactly one rendering surface at a time.
//!
//! The router is the only component allowed to mutate surface visibility,
//! and it is only ever invoked from the single event-processing path, so
//! mutual exclusion across surfaces holds by construction rather than by
//! locking. It delegates the actual drawing to a [`RenderSurfaces`] trait
//! object; the backends live in the infrastructure layer.

use std::sync::Arc;

use signview_core::{ContentItem, ContentKind, RenderTarget};
use thiserror::Error;

/// Error type for render backend operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The backend could not apply a visibility or content change.
    #[error("render backend error: {0}")]
    Backend(String),
    /// The backend is missing a required surface entirely. Fatal at startup:
    /// the client refuses to proceed with a half-usable terminal.
    #[error("rendering surface {0:?} is not available")]
    MissingSurface(ContentKind),
}

/// Backend-agnostic rendering surface control.
///
/// Implementations own the pixels (a webview binding on a kiosk, a recording
/// fake in tests, a tracing backend for headless development). The router
/// drives them with the invariant that `set_visible(k, true)` is always
/// preceded by hiding every other surface.
pub trait RenderSurfaces: Send + Sync {
    /// Shows or hides one surface.
    fn set_visible(&self, kind: ContentKind, visible: bool) -> Result<(), RenderError>;

    /// Replaces the content of one surface without changing its visibility.
    fn set_content(&self, kind: ContentKind, payload: &str) -> Result<(), RenderError>;
}

/// The content routing use case.
///
/// Owns the single tagged [`RenderTarget`] and sequences every transition as
/// hide-others-then-show-target, so no observer can ever see two surfaces
/// visible at once (hide-before-show is the safe order).
pub struct ContentRouter {
    surfaces: Arc<dyn RenderSurfaces>,
    target: RenderTarget,
    disconnected_asset: String,
}

impl ContentRouter {
    /// Creates a router over the given backend.
    ///
    /// `disconnected_asset` is the local image path used for the fallback
    /// indicator; it must render with no network connection.
    pub fn new(surfaces: Arc<dyn RenderSurfaces>, disconnected_asset: impl Into<String>) -> Self {
        Self {
            surfaces,
            target: RenderTarget::Blank,
            disconnected_asset: disconnected_asset.into(),
        }
    }

    /// Hides every surface and resets the target to blank.
    ///
    /// Called once at startup (and after a full reload) both to establish a
    /// known state and to probe the backend: a backend that cannot even hide
    /// its surfaces is missing them, which is fatal to initialization.
    ///
    /// # Errors
    ///
    /// Returns the first backend error encountered.
    pub fn reset(&mut self) -> Result<(), RenderError> {
        for kind in ContentKind::ALL {
            self.surfaces.set_visible(kind, false)?;
        }
        self.target = RenderTarget::Blank;
        Ok(())
    }

    /// Activates the surface for `kind` with the given payload and hides all
    /// other surfaces.
    ///
    /// Re-activating the identical `(kind, payload)` pair is visually a
    /// no-op; it is applied naively rather than specially detected.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the backend rejects a transition. The
    /// caller logs and carries on — a render hiccup must not take down an
    /// unattended terminal.
    pub fn activate(&mut self, kind: ContentKind, payload: &str) -> Result<(), RenderError> {
        // Hide first so that a crash between the two steps leaves zero
        // surfaces visible rather than two.
        for other in ContentKind::ALL {
            if other != kind {
                self.surfaces.set_visible(other, false)?;
            }
        }
        self.surfaces.set_content(kind, payload)?;
        self.surfaces.set_visible(kind, true)?;

        self.target = RenderTarget::Content(ContentItem::new(kind, payload));
        Ok(())
    }

    /// Shows the disconnected indicator.
    ///
    /// This is the fourth, implicit surface: it reuses the image path with
    /// the built-in asset so that an explicit server `Disconnected` frame and
    /// a transport-level drop produce the same visible result.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the backend rejects the transition.
    pub fn show_disconnected(&mut self) -> Result<(), RenderError> {
        let asset = self.disconnected_asset.clone();
        self.activate(ContentKind::Image, &asset)
    }

    /// The currently visible target.
    pub fn current(&self) -> &RenderTarget {
        &self.target
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
