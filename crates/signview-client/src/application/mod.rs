//! Application-layer use cases.
//!
//! Each use case sits behind a trait seam so that infrastructure concerns
//! (the actual render backend, the actual reload mechanism) stay pluggable
//! and testable with recording fakes.

pub mod route_content;
pub mod sync_display;
pub mod version_guard;

pub use route_content::{ContentRouter, RenderError, RenderSurfaces};
pub use sync_display::{DisplaySync, FrameOutcome};
pub use version_guard::{ReloadHandle, VersionGuard, VersionOutcome};
