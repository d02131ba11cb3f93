//! Single-room chat relay over WebSocket.
//!
//! Clients join with a nickname, receive a snapshot of the room (categories,
//! message log, joined sessions) and then every later change as it happens.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod app;
pub mod config;
pub mod error;

pub use app::build_server;
pub use config::RelayConfig;
pub use error::ServerError;
