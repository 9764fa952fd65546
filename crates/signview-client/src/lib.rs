//! SignView display client library.
//!
//! The client keeps one unattended terminal in sync with the central signage
//! server: it maintains a persistent WebSocket connection, interprets pushed
//! frames, routes content to exactly one rendering surface, falls back to a
//! disconnected indicator when the link drops, and forces a full reload when
//! the server's build fingerprint changes.
//!
//! Layering follows Clean Architecture:
//!
//! - **`domain`** – Configuration and the connectivity state owned by the
//!   transport. No I/O.
//! - **`application`** – Use cases behind trait seams: content routing,
//!   version guarding, and the display-sync state machine that combines them.
//! - **`infrastructure`** – The WebSocket transport with its reconnect loop,
//!   the render backends, and the reload flag.

pub mod application;
pub mod domain;
pub mod infrastructure;
