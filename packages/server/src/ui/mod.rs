//! UI layer: HTTP and WebSocket surface of the canvas server.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use signal::shutdown_signal;
