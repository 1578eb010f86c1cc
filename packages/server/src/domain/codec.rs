//! Snapshot codec interface.

use super::{canvas::Canvas, error::CodecError};

/// Serializes a canvas to a self-describing image byte format and back
pub trait CanvasCodec: Send + Sync {
    fn encode(&self, canvas: &Canvas) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<Canvas, CodecError>;

    /// MIME type of the encoded bytes
    fn content_type(&self) -> &'static str;
}
