//! Request handlers.

mod http;
mod websocket;

pub use http::{get_canvas, get_status, health_check};
pub use websocket::websocket_handler;
