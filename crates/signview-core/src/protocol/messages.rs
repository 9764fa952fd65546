//! All server-to-client protocol frame types.
//!
//! The signage server pushes JSON text frames over the persistent WebSocket
//! connection, one logical update per frame. Every frame is an object with
//! exactly one populated top-level key naming the variant:
//!
//! ```json
//! { "Disconnected": true }
//! { "Display": { "type": "Website", "data": { "content": "https://example.org" } } }
//! { "Hash": "a1b2c3d4" }
//! ```
//!
//! Serde's default externally-tagged enum representation matches this layout
//! exactly, so no custom deserializer is needed. A frame whose top-level key
//! is not one of the three known tags fails to deserialize; the transport
//! logs and discards it, which is how unknown future tags stay additive.

use serde::{Deserialize, Serialize};

use crate::domain::content::{ContentItem, ContentKind};

/// One decoded server-pushed frame.
///
/// The server never batches: each WebSocket text frame carries exactly one
/// `ServerMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// The terminal should show its offline/idle state.
    ///
    /// This is a *server policy* signal (e.g. the display has no schedule),
    /// distinct from a transport-level disconnect, which the client detects
    /// on its own. The carried boolean is always `true` on the wire; the
    /// presence of the tag is the signal.
    Disconnected(bool),

    /// Render the given content item, superseding whatever is visible.
    Display(DisplayPayload),

    /// The server's current build fingerprint.
    ///
    /// The first value received after startup becomes the comparison
    /// baseline; a later differing value forces a full client reload.
    Hash(String),
}

/// Content carried by a `Display` frame.
///
/// The `{"type": ..., "data": ...}` JSON layout comes from serde's adjacent
/// tagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DisplayPayload {
    /// A URL to load in the website surface (an iframe on a browser kiosk).
    Website(MediaPayload),
    /// A URL to load in the image surface.
    Image(MediaPayload),
    /// Raw markup to place in the text surface.
    Text(MediaPayload),
}

impl DisplayPayload {
    /// The rendering surface this payload targets.
    pub fn kind(&self) -> ContentKind {
        match self {
            DisplayPayload::Website(_) => ContentKind::Website,
            DisplayPayload::Image(_) => ContentKind::Image,
            DisplayPayload::Text(_) => ContentKind::Text,
        }
    }

    /// The payload string, interpreted per [`kind`](Self::kind).
    pub fn content(&self) -> &str {
        match self {
            DisplayPayload::Website(m) | DisplayPayload::Image(m) | DisplayPayload::Text(m) => {
                &m.content
            }
        }
    }

    /// Converts the wire payload into the domain [`ContentItem`].
    pub fn into_content_item(self) -> ContentItem {
        let kind = self.kind();
        match self {
            DisplayPayload::Website(m) | DisplayPayload::Image(m) | DisplayPayload::Text(m) => {
                ContentItem::new(kind, m.content)
            }
        }
    }
}

/// The single-field object carried by every [`DisplayPayload`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPayload {
    /// URL for `Website`/`Image`, raw markup for `Text`.
    pub content: String,
}

impl MediaPayload {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
