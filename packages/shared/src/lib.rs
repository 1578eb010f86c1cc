//! Utilities shared between the Hekiga server and client.

pub mod logger;
pub mod time;
