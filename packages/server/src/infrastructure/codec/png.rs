//! PNG snapshot codec.
//!
//! Snapshots are written as 8-bit RGB. Decoding also accepts RGBA, grayscale
//! and palette images (alpha is dropped) so hand-edited files can be restored.

use ::png::{BitDepth, ColorType, Decoder, Encoder, Transformations};

use crate::domain::{Canvas, CanvasCodec, CodecError, Dimensions};

#[derive(Debug, Clone, Copy, Default)]
pub struct PngCanvasCodec;

impl PngCanvasCodec {
    pub fn new() -> Self {
        Self
    }
}

impl CanvasCodec for PngCanvasCodec {
    fn encode(&self, canvas: &Canvas) -> Result<Vec<u8>, CodecError> {
        let dimensions = canvas.dimensions();
        let mut bytes = Vec::new();

        let mut encoder = Encoder::new(&mut bytes, dimensions.width, dimensions.height);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        writer
            .write_image_data(canvas.as_rgb())
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Canvas, CodecError> {
        let mut decoder = Decoder::new(bytes);
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

        let mut reader = decoder
            .read_info()
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        let mut buffer = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buffer)
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        buffer.truncate(info.buffer_size());

        let rgb = match info.color_type {
            ColorType::Rgb => buffer,
            ColorType::Rgba => buffer
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            ColorType::Grayscale => buffer.iter().flat_map(|&v| [v, v, v]).collect(),
            ColorType::GrayscaleAlpha => buffer
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0]])
                .collect(),
            other => {
                return Err(CodecError::UnsupportedFormat(format!("{:?}", other)));
            }
        };

        let canvas = Canvas::from_rgb(Dimensions::new(info.width, info.height), rgb)?;
        Ok(canvas)
    }

    fn content_type(&self) -> &'static str {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Color, Pixel, Position};

    fn encode_raw(width: u32, height: u32, color: ColorType, data: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut encoder = Encoder::new(&mut bytes, width, height);
        encoder.set_color(color);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
        bytes
    }

    #[test]
    fn test_painted_pixel_survives_encode_and_decode() {
        // テスト項目: paint した色がエンコード・デコード後も同じ座標にだけ残っている
        // given (前提条件):
        let codec = PngCanvasCodec::new();
        let mut canvas = Canvas::new(4, 4).unwrap();
        let red = Color::new(255, 0, 0);
        canvas.paint(Pixel::new(Position::new(1, 1), red));

        // when (操作):
        let bytes = codec.encode(&canvas).unwrap();
        let decoded = codec.decode(&bytes).unwrap();

        // then (期待する結果):
        assert_eq!(decoded.dimensions(), Dimensions::new(4, 4));
        assert_eq!(decoded.color_at(Position::new(1, 1)), Some(red));
        assert_eq!(decoded.color_at(Position::new(0, 0)), Some(Color::WHITE));
        assert_eq!(decoded, canvas);
    }

    #[test]
    fn test_encoded_snapshot_is_png() {
        // テスト項目: エンコード結果は PNG シグネチャで始まる
        // given (前提条件):
        let codec = PngCanvasCodec::new();
        let canvas = Canvas::new(2, 2).unwrap();

        // when (操作):
        let bytes = codec.encode(&canvas).unwrap();

        // then (期待する結果):
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(codec.content_type(), "image/png");
    }

    #[test]
    fn test_decode_rgba_drops_alpha() {
        // テスト項目: RGBA の PNG はアルファを捨てて RGB として読み込まれる
        // given (前提条件):
        let codec = PngCanvasCodec::new();
        let bytes = encode_raw(2, 1, ColorType::Rgba, &[10, 20, 30, 0, 40, 50, 60, 255]);

        // when (操作):
        let canvas = codec.decode(&bytes).unwrap();

        // then (期待する結果):
        assert_eq!(canvas.color_at(Position::new(0, 0)), Some(Color::new(10, 20, 30)));
        assert_eq!(canvas.color_at(Position::new(1, 0)), Some(Color::new(40, 50, 60)));
    }

    #[test]
    fn test_decode_grayscale_expands_to_rgb() {
        // テスト項目: グレースケールの PNG は RGB に展開される
        // given (前提条件):
        let codec = PngCanvasCodec::new();
        let bytes = encode_raw(1, 2, ColorType::Grayscale, &[0, 200]);

        // when (操作):
        let canvas = codec.decode(&bytes).unwrap();

        // then (期待する結果):
        assert_eq!(canvas.color_at(Position::new(0, 0)), Some(Color::new(0, 0, 0)));
        assert_eq!(canvas.color_at(Position::new(0, 1)), Some(Color::new(200, 200, 200)));
    }

    #[test]
    fn test_decode_garbage_fails() {
        // テスト項目: PNG ではないバイト列のデコードはエラーになる
        // given (前提条件):
        let codec = PngCanvasCodec::new();

        // when (操作):
        let result = codec.decode(b"definitely not a png");

        // then (期待する結果):
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }
}
