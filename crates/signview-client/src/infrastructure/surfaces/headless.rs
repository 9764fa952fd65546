//! Headless render backend.
//!
//! Traces every surface transition instead of drawing, which is what you
//! want when running the client on a box with no attached display: the log
//! stream shows exactly what a kiosk would be showing. In a kiosk deployment
//! the webview binding replaces this backend behind the same trait.

use std::collections::HashMap;
use std::sync::Mutex;

use signview_core::ContentKind;
use tracing::info;

use crate::application::route_content::{RenderError, RenderSurfaces};

/// A [`RenderSurfaces`] implementation that logs transitions.
///
/// Tracks visibility so repeated hides of an already-hidden surface (which
/// the router emits on every activation) do not flood the log.
#[derive(Default)]
pub struct HeadlessSurfaces {
    visible: Mutex<HashMap<ContentKind, bool>>,
}

impl HeadlessSurfaces {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurfaces for HeadlessSurfaces {
    fn set_visible(&self, kind: ContentKind, visible: bool) -> Result<(), RenderError> {
        let mut map = self.visible.lock().map_err(|e| {
            // A poisoned lock means a previous render call panicked; the
            // backend is unusable.
            RenderError::Backend(e.to_string())
        })?;
        let previous = map.insert(kind, visible).unwrap_or(false);
        if previous != visible {
            info!(
                "surface {kind:?} is now {}",
                if visible { "visible" } else { "hidden" }
            );
        }
        Ok(())
    }

    fn set_content(&self, kind: ContentKind, payload: &str) -> Result<(), RenderError> {
        info!("surface {kind:?} content set to {payload:?}");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
