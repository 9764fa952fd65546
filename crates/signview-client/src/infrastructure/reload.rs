//! Full-reload plumbing.
//!
//! A browser kiosk implements reload by navigating the webview; this binary
//! implements it as a flag the outer loop in `main` observes to tear the
//! whole client down and re-initialize from scratch. Both are equivalent to
//! a process restart: all in-memory state is discarded atomically.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::application::version_guard::ReloadHandle;

/// A [`ReloadHandle`] backed by an atomic flag.
#[derive(Default)]
pub struct ReloadFlag {
    requested: AtomicBool,
}

impl ReloadFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a reload has been requested since the last `take`.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }

    /// Consumes the request, returning whether one was pending.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::Relaxed)
    }
}

impl ReloadHandle for ReloadFlag {
    fn request_reload(&self) {
        info!("full client reload requested");
        self.requested.store(true, Ordering::Relaxed);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_starts_unrequested() {
        let flag = ReloadFlag::new();
        assert!(!flag.is_requested());
    }

    #[test]
    fn test_request_sets_and_take_consumes() {
        // Arrange
        let flag = ReloadFlag::new();

        // Act
        flag.request_reload();

        // Assert
        assert!(flag.is_requested());
        assert!(flag.take());
        assert!(!flag.is_requested());
        assert!(!flag.take(), "a consumed request must not fire twice");
    }
}
