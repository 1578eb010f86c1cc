//! Hekiga server: a shared pixel canvas edited in real time over WebSocket.
//!
//! Layers:
//! - `domain`: canvas, cooldown and the interfaces the rest of the crate depends on
//! - `usecase`: application operations (session, paint, game loop, persistence)
//! - `infrastructure`: broadcaster, codec, repository, storage and auth implementations
//! - `ui`: Axum router and handlers
//! - `bootstrap`: wiring everything together from a [`config::ServerConfig`]

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
