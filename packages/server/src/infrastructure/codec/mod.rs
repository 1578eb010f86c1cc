//! Canvas snapshot codecs.

pub mod png;

pub use self::png::PngCanvasCodec;
