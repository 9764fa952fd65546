//! VersionGuard: detects stale client code via the server's build fingerprint.
//!
//! A server-side deployment bumps its build fingerprint; terminals notice the
//! change and self-heal to the new version with a full reload, which matters
//! because nobody is physically present to press F5.
//!
//! The baseline is scoped to one *reload* lifetime, not one connection: a
//! reconnect after a transient drop with an unchanged server fingerprint must
//! NOT reload. Conflating "new connection" with "new baseline" is the classic
//! bug this module exists to avoid.

use std::sync::Arc;

use tracing::info;

/// Mechanism that performs the full client reload.
///
/// On a kiosk this navigates the webview; in this binary it flags the outer
/// loop to tear everything down and re-initialize, which is equivalent to a
/// process restart (all in-memory state is discarded atomically).
pub trait ReloadHandle: Send + Sync {
    /// Requests an unconditional full client reload.
    fn request_reload(&self);
}

/// Result of observing one fingerprint value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOutcome {
    /// First value seen since startup/reload; stored as the baseline.
    BaselineSet,
    /// Value matches the baseline; nothing to do.
    Match,
    /// Value differs from the baseline; a reload has been requested.
    Mismatch,
}

/// Tracks the server's build fingerprint across one reload lifetime.
pub struct VersionGuard {
    baseline: Option<String>,
    reload_requested: bool,
    reload: Arc<dyn ReloadHandle>,
}

impl VersionGuard {
    /// Creates a guard with no baseline (state `Unset`).
    pub fn new(reload: Arc<dyn ReloadHandle>) -> Self {
        Self {
            baseline: None,
            reload_requested: false,
            reload,
        }
    }

    /// Observes one fingerprint value from a `Hash` frame.
    ///
    /// The first value always wins as the baseline regardless of how many
    /// connection attempts preceded it. On a mismatch the reload is requested
    /// exactly once; the guard then goes inert, because the reload tears the
    /// whole client down anyway.
    pub fn observe(&mut self, hash: &str) -> VersionOutcome {
        if self.reload_requested {
            // Terminal state: the reload is already in flight.
            return VersionOutcome::Mismatch;
        }

        match &self.baseline {
            None => {
                info!("version fingerprint baseline set: {hash:?}");
                self.baseline = Some(hash.to_string());
                VersionOutcome::BaselineSet
            }
            Some(baseline) if baseline == hash => VersionOutcome::Match,
            Some(baseline) => {
                info!(
                    "version fingerprint changed ({baseline:?} -> {hash:?}); requesting full reload"
                );
                self.reload_requested = true;
                self.reload.request_reload();
                VersionOutcome::Mismatch
            }
        }
    }

    /// The current baseline, if one has been observed.
    pub fn baseline(&self) -> Option<&str> {
        self.baseline.as_deref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts reload requests instead of performing them.
    #[derive(Default)]
    struct CountingReload {
        count: AtomicUsize,
    }

    impl ReloadHandle for CountingReload {
        fn request_reload(&self) {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn make_guard() -> (VersionGuard, Arc<CountingReload>) {
        let reload = Arc::new(CountingReload::default());
        let guard = VersionGuard::new(Arc::clone(&reload) as Arc<dyn ReloadHandle>);
        (guard, reload)
    }

    #[test]
    fn test_first_hash_sets_baseline_without_reload() {
        // Arrange
        let (mut guard, reload) = make_guard();

        // Act
        let outcome = guard.observe("abc");

        // Assert
        assert_eq!(outcome, VersionOutcome::BaselineSet);
        assert_eq!(guard.baseline(), Some("abc"));
        assert_eq!(reload.count.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_matching_hash_is_a_noop() {
        // Arrange
        let (mut guard, reload) = make_guard();
        guard.observe("abc");

        // Act
        let outcome = guard.observe("abc");

        // Assert – scenario: "abc", "abc" → no reload
        assert_eq!(outcome, VersionOutcome::Match);
        assert_eq!(reload.count.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_differing_hash_triggers_reload_exactly_once() {
        // Arrange – scenario: "abc", "abc", then "def"
        let (mut guard, reload) = make_guard();
        guard.observe("abc");
        guard.observe("abc");

        // Act
        let outcome = guard.observe("def");

        // Assert
        assert_eq!(outcome, VersionOutcome::Mismatch);
        assert_eq!(reload.count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_guard_is_inert_after_mismatch() {
        // Arrange
        let (mut guard, reload) = make_guard();
        guard.observe("abc");
        guard.observe("def");

        // Act – further observations while the reload is in flight
        guard.observe("ghi");
        guard.observe("abc");

        // Assert – still exactly one reload request
        assert_eq!(reload.count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_baseline_survives_repeated_observation_sequences() {
        // A reconnect delivers the same fingerprint again; the baseline must
        // hold and no reload may fire (the guard resets on reload, never on
        // reconnect).
        let (mut guard, reload) = make_guard();
        for _ in 0..5 {
            guard.observe("abc");
        }
        assert_eq!(guard.baseline(), Some("abc"));
        assert_eq!(reload.count.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_first_seen_value_wins_as_baseline() {
        // Arrange
        let (mut guard, _reload) = make_guard();

        // Act
        guard.observe("first");

        // Assert – the baseline is the first value, not the latest
        let outcome = guard.observe("second");
        assert_eq!(outcome, VersionOutcome::Mismatch);
        assert_eq!(guard.baseline(), Some("first"));
    }
}
