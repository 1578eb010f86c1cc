//! Value objects of the canvas domain.

use std::fmt;

/// Identity of an authenticated user, issued by the authenticator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u64);

impl UserId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque session credential presented by a connecting client (the `session` cookie)
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Credentials never end up in logs
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Position on the canvas
///
/// Coordinates are signed so that requests from clients can be represented
/// before the bounds check rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// A single paint event: one color at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub position: Position,
    pub color: Color,
}

impl Pixel {
    pub fn new(position: Position, color: Color) -> Self {
        Self { position, color }
    }
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `0 <= x < width && 0 <= y < height`
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i64::from(self.width)
            && position.y < i64::from(self.height)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_contains_inner_and_edge_positions() {
        // テスト項目: 範囲内（端を含む）の座標は true になる
        // given (前提条件):
        let dimensions = Dimensions::new(4, 3);

        // when (操作):
        let origin = dimensions.contains(Position::new(0, 0));
        let corner = dimensions.contains(Position::new(3, 2));

        // then (期待する結果):
        assert!(origin);
        assert!(corner);
    }

    #[test]
    fn test_dimensions_rejects_outside_positions() {
        // テスト項目: 範囲外の座標（負の値、幅・高さちょうど）は false になる
        // given (前提条件):
        let dimensions = Dimensions::new(4, 3);

        // when (操作):
        let rejected = [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(4, 0),
            Position::new(0, 3),
            Position::new(i64::MAX, i64::MIN),
        ];

        // then (期待する結果):
        for position in rejected {
            assert!(!dimensions.contains(position), "{:?}", position);
        }
    }

    #[test]
    fn test_session_token_debug_hides_value() {
        // テスト項目: SessionToken の Debug 出力に値が含まれない
        // given (前提条件):
        let token = SessionToken::new("secret-cookie");

        // when (操作):
        let debug = format!("{:?}", token);

        // then (期待する結果):
        assert!(!debug.contains("secret-cookie"));
        assert_eq!(token.as_str(), "secret-cookie");
    }
}
