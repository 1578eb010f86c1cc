//! Hekiga CLI client.
//!
//! Connects to a canvas server, prints the snapshot size and every pixel
//! update, and sends paint commands typed at the prompt.

pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;

pub use runner::run_client;
