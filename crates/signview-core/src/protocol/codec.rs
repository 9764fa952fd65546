//! JSON codec for the server-to-client protocol.
//!
//! The transport hands every inbound text frame to [`decode_frame`]. A frame
//! that does not decode is discarded by the caller after logging — the
//! terminal must never crash or change visible state because of one bad
//! frame, since a wedged unattended terminal is worse than a skipped update.

use thiserror::Error;

use crate::protocol::messages::ServerMessage;

/// Errors produced when an inbound frame cannot be interpreted.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The frame is not valid JSON, or its shape matches no known variant.
    ///
    /// Unknown future tags land here as well; callers treat this error as
    /// "ignore the frame", which keeps protocol evolution additive.
    #[error("unrecognized frame: {0}")]
    Unrecognized(#[from] serde_json::Error),
}

/// Decodes one JSON text frame into a [`ServerMessage`].
///
/// # Errors
///
/// Returns [`FrameError::Unrecognized`] for malformed JSON and for shapes
/// that match none of the known frame variants.
pub fn decode_frame(raw: &str) -> Result<ServerMessage, FrameError> {
    Ok(serde_json::from_str(raw)?)
}

/// Encodes a [`ServerMessage`] as a JSON text frame.
///
/// The display client itself never sends frames; this exists for test
/// harnesses and development servers that impersonate the signage server.
///
/// # Errors
///
/// Returns [`FrameError::Unrecognized`] if serialization fails, which cannot
/// happen for these types in practice.
pub fn encode_frame(msg: &ServerMessage) -> Result<String, FrameError> {
    Ok(serde_json::to_string(msg)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
