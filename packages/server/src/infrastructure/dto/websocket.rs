//! WebSocket message DTOs.
//!
//! The first server frame of a session is a binary snapshot and carries no
//! DTO. Every text frame in both directions is a [`PixelMessage`].

use serde::{Deserialize, Serialize};

/// A pixel update as it travels over the wire: `{"pos":[x,y],"color":[r,g,b]}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelMessage {
    #[serde(alias = "Pos")]
    pub pos: [i64; 2],
    #[serde(alias = "Color")]
    pub color: [u8; 3],
}

impl PixelMessage {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pixel_message() {
        // テスト項目: 正しい JSON から PixelMessage を読み取れる
        // given (前提条件):
        let text = r#"{"pos":[1,2],"color":[255,0,128]}"#;

        // when (操作):
        let message = PixelMessage::from_json(text).unwrap();

        // then (期待する結果):
        assert_eq!(message.pos, [1, 2]);
        assert_eq!(message.color, [255, 0, 128]);
    }

    #[test]
    fn test_parse_accepts_capitalized_field_names() {
        // テスト項目: 先頭が大文字のフィールド名（Pos / Color）も受け付ける
        // given (前提条件):
        let text = r#"{"Pos":[3,4],"Color":[1,2,3]}"#;

        // when (操作):
        let message = PixelMessage::from_json(text).unwrap();

        // then (期待する結果):
        assert_eq!(message.pos, [3, 4]);
        assert_eq!(message.color, [1, 2, 3]);
    }

    #[test]
    fn test_parse_keeps_negative_coordinates() {
        // テスト項目: 負の座標もパースでき、範囲チェックは後段に任される
        // given (前提条件):
        let text = r#"{"pos":[-1,0],"color":[0,0,0]}"#;

        // when (操作):
        let message = PixelMessage::from_json(text).unwrap();

        // then (期待する結果):
        assert_eq!(message.pos, [-1, 0]);
    }

    #[test]
    fn test_parse_rejects_malformed_payloads() {
        // テスト項目: 不正なペイロードはパースエラーになる
        // given (前提条件):
        let payloads = [
            "not json",
            r#"{"pos":[1,2]}"#,
            r#"{"pos":[1],"color":[0,0,0]}"#,
            r#"{"pos":[1,2],"color":[256,0,0]}"#,
            r#"{"pos":["1",2],"color":[0,0,0]}"#,
        ];

        // when (操作) / then (期待する結果):
        for payload in payloads {
            assert!(PixelMessage::from_json(payload).is_err(), "{}", payload);
        }
    }

    #[test]
    fn test_serialize_shape() {
        // テスト項目: シリアライズ結果がクライアントと同じ形式になる
        // given (前提条件):
        let message = PixelMessage {
            pos: [1, 1],
            color: [255, 0, 0],
        };

        // when (操作):
        let json = message.to_json().unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"pos":[1,1],"color":[255,0,0]}"#);
    }
}
