//! Render backend implementations of [`RenderSurfaces`].
//!
//! The kiosk shell owns the actual pixels; a webview binding implements the
//! same trait in a kiosk deployment. This module ships the two backends the
//! repository itself needs: a recording fake for tests and a headless backend
//! that traces every transition for development on a machine with no display.
//!
//! [`RenderSurfaces`]: crate::application::route_content::RenderSurfaces

pub mod headless;
pub mod mock;
