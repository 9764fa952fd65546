//! Recording render backend for tests and local development.
//!
//! Records every visibility and content transition instead of drawing
//! anything, so tests can assert both the final state (which surfaces are
//! visible, with what content) and the exact order of operations (hides
//! before shows).

use std::collections::HashMap;
use std::sync::Mutex;

use signview_core::ContentKind;

use crate::application::route_content::{RenderError, RenderSurfaces};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    SetVisible(ContentKind, bool),
    SetContent(ContentKind, String),
}

/// A [`RenderSurfaces`] implementation that records instead of rendering.
///
/// Interior mutability via `std::sync::Mutex` because the trait takes
/// `&self`; none of the lock holds cross an await point.
#[derive(Default)]
pub struct RecordingSurfaces {
    visible: Mutex<HashMap<ContentKind, bool>>,
    contents: Mutex<HashMap<ContentKind, String>>,
    ops: Mutex<Vec<SurfaceOp>>,
    should_fail: bool,
}

impl RecordingSurfaces {
    /// A backend where every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend where every call fails, to exercise error paths (a kiosk
    /// whose surfaces are missing behaves like this at startup).
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// The kinds currently visible, in [`ContentKind::ALL`] order.
    pub fn visible_kinds(&self) -> Vec<ContentKind> {
        let visible = self.visible.lock().unwrap();
        ContentKind::ALL
            .into_iter()
            .filter(|k| visible.get(k).copied().unwrap_or(false))
            .collect()
    }

    /// The last content assigned to a surface, if any.
    pub fn content_of(&self, kind: ContentKind) -> Option<String> {
        self.contents.lock().unwrap().get(&kind).cloned()
    }

    /// The full operation log, in call order.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().unwrap().clone()
    }
}

impl RenderSurfaces for RecordingSurfaces {
    fn set_visible(&self, kind: ContentKind, visible: bool) -> Result<(), RenderError> {
        if self.should_fail {
            return Err(RenderError::MissingSurface(kind));
        }
        self.visible.lock().unwrap().insert(kind, visible);
        self.ops
            .lock()
            .unwrap()
            .push(SurfaceOp::SetVisible(kind, visible));
        Ok(())
    }

    fn set_content(&self, kind: ContentKind, payload: &str) -> Result<(), RenderError> {
        if self.should_fail {
            return Err(RenderError::MissingSurface(kind));
        }
        self.contents
            .lock()
            .unwrap()
            .insert(kind, payload.to_string());
        self.ops
            .lock()
            .unwrap()
            .push(SurfaceOp::SetContent(kind, payload.to_string()));
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
