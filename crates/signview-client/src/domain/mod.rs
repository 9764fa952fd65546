//! Domain types for the display client: configuration and connectivity state.

pub mod config;
pub mod connectivity;

pub use config::ClientConfig;
pub use connectivity::ConnectivityState;
