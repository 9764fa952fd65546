//! Content model: what an unattended terminal can render.
//!
//! A terminal offers a small fixed set of mutually exclusive rendering
//! surfaces. Rather than tracking one visibility boolean per surface (which
//! allows the illegal "two surfaces visible" state), the client tracks a
//! single tagged [`RenderTarget`] — the illegal state is unrepresentable.

/// The mutually exclusive rendering surfaces a terminal offers.
///
/// The disconnected indicator is not a fourth kind: it reuses the `Image`
/// surface with a fixed built-in asset, so that an explicit server
/// `Disconnected` frame and a transport-level drop look identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// An embedded web page, identified by URL.
    Website,
    /// A static image, identified by URL or local path.
    Image,
    /// A block of raw markup.
    Text,
}

impl ContentKind {
    /// Every surface, in a fixed order. Used by the router to hide all
    /// non-target surfaces.
    pub const ALL: [ContentKind; 3] = [ContentKind::Website, ContentKind::Image, ContentKind::Text];
}

/// A concrete piece of content: a surface plus its payload string.
///
/// The payload is interpreted per kind — a URL for `Website`/`Image`, raw
/// markup for `Text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub payload: String,
}

impl ContentItem {
    pub fn new(kind: ContentKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }
}

/// What the terminal is currently showing.
///
/// Starts as [`Blank`](RenderTarget::Blank) and moves to
/// [`Content`](RenderTarget::Content) on the first `Display` frame (or the
/// disconnected fallback). Content is never explicitly destroyed — the
/// terminal shows the last known item until superseded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderTarget {
    /// Nothing visible yet (initial state after startup or reload).
    #[default]
    Blank,
    /// Exactly this item is visible.
    Content(ContentItem),
}

impl RenderTarget {
    /// The kind of the currently visible surface, if any.
    pub fn visible_kind(&self) -> Option<ContentKind> {
        match self {
            RenderTarget::Blank => None,
            RenderTarget::Content(item) => Some(item.kind),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
