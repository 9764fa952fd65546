//! Infrastructure layer: WebSocket transport, render backends, and reload.

pub mod network;
pub mod reload;
pub mod surfaces;
