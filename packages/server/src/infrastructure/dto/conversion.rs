//! Conversion logic between DTOs and domain values.

use crate::domain::{Color, Pixel, Position};
use crate::infrastructure::dto::websocket::PixelMessage;

// ========================================
// DTO → Domain
// ========================================

impl From<PixelMessage> for Pixel {
    fn from(dto: PixelMessage) -> Self {
        let [x, y] = dto.pos;
        Pixel::new(Position::new(x, y), Color::from(dto.color))
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Pixel> for PixelMessage {
    fn from(model: Pixel) -> Self {
        Self {
            pos: [model.position.x, model.position.y],
            color: model.color.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_message_to_domain() {
        // テスト項目: DTO からドメインの Pixel に変換できる
        // given (前提条件):
        let dto = PixelMessage {
            pos: [5, 6],
            color: [7, 8, 9],
        };

        // when (操作):
        let pixel: Pixel = dto.into();

        // then (期待する結果):
        assert_eq!(pixel.position, Position::new(5, 6));
        assert_eq!(pixel.color, Color::new(7, 8, 9));
    }

    #[test]
    fn test_domain_to_pixel_message() {
        // テスト項目: ドメインの Pixel から DTO に変換できる
        // given (前提条件):
        let pixel = Pixel::new(Position::new(0, 3), Color::new(10, 20, 30));

        // when (操作):
        let dto = PixelMessage::from(pixel);

        // then (期待する結果):
        assert_eq!(dto.pos, [0, 3]);
        assert_eq!(dto.color, [10, 20, 30]);
    }
}
