//! # signview-core
//!
//! Shared library for SignView containing the server-to-client wire protocol
//! and the content domain model.
//!
//! This crate is used by the display client binary and by test harnesses that
//! impersonate the signage server. It has zero dependencies on OS APIs, UI
//! frameworks, or network sockets.
//!
//! - **`protocol`** – The JSON frame types the signage server pushes over the
//!   persistent WebSocket connection, plus the decoder that classifies each
//!   inbound frame into exactly one known variant.
//!
//! - **`domain`** – Pure content model: which rendering surface a payload
//!   targets, and the single tagged render target the client tracks so that
//!   two surfaces being visible at once is unrepresentable.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `signview_core::ServerMessage` instead of the full module path.
pub use domain::content::{ContentItem, ContentKind, RenderTarget};
pub use protocol::codec::{decode_frame, encode_frame, FrameError};
pub use protocol::messages::{DisplayPayload, MediaPayload, ServerMessage};
