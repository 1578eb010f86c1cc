//! Domain errors.

use thiserror::Error;

use super::value_object::Dimensions;

/// Canvas construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    #[error("canvas dimensions must be non-zero (got {0})")]
    EmptyDimensions(Dimensions),

    #[error("pixel buffer of {actual} bytes does not match {dimensions} RGB canvas ({expected} bytes)")]
    BufferSizeMismatch {
        dimensions: Dimensions,
        expected: usize,
        actual: usize,
    },

    #[error("canvas is {actual} but {expected} was expected")]
    DimensionMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },
}

/// Snapshot encoding/decoding errors
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode snapshot: {0}")]
    Encode(String),

    #[error("failed to decode snapshot: {0}")]
    Decode(String),

    #[error("unsupported snapshot pixel format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Durable snapshot storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}
