//! Pure domain types with no OS, socket, or UI dependencies.

pub mod content;

pub use content::{ContentItem, ContentKind, RenderTarget};
