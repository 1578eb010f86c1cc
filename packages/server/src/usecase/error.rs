//! UseCase errors.

use std::time::Duration;

use thiserror::Error;

use crate::domain::{CodecError, Position, StorageError};

/// Errors while admitting a new session
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("no session cookie presented")]
    MissingCredentials,

    #[error("session is not authorized")]
    Unauthorized,

    #[error("failed to export canvas snapshot: {0}")]
    Snapshot(#[from] CodecError),
}

/// Reasons a paint request is not published
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaintError {
    /// Soft rejection: the request is dropped and the session continues
    #[error("user is cooling down for another {remaining:?}")]
    CoolingDown { remaining: Duration },

    /// Protocol violation: the session is terminated
    #[error("pixel position {position:?} is outside of the canvas")]
    OutOfBounds { position: Position },
}

/// Errors while writing a snapshot to durable storage
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
