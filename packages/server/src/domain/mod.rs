//! Domain layer: canvas model, value objects and the interfaces the rest of
//! the server depends on.
//!
//! Concrete implementations of the traits defined here live in the
//! infrastructure layer.

pub mod auth;
pub mod broadcast;
pub mod canvas;
pub mod codec;
pub mod cooldown;
pub mod error;
pub mod repository;
pub mod value_object;

pub use auth::Authenticator;
pub use broadcast::{Broadcaster, ReceiveError, Subscription};
pub use canvas::Canvas;
pub use codec::CanvasCodec;
pub use cooldown::{CooldownDecision, CooldownGate};
pub use error::{CanvasError, CodecError, StorageError};
pub use repository::{CanvasRepository, SnapshotStore};
pub use value_object::{Color, Dimensions, Pixel, Position, SessionToken, UserId};
