//! Parsing of paint commands typed at the prompt.
//!
//! Accepted forms:
//! - `x y #rrggbb` (the `#` is optional)
//! - `x y r g b` with decimal channels

use hekiga_server::infrastructure::dto::websocket::PixelMessage;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("usage: <x> <y> #rrggbb | <x> <y> <r> <g> <b>")]
    Usage,

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("invalid color '{0}'")]
    InvalidColor(String),
}

/// A single paint request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintCommand {
    pub x: i64,
    pub y: i64,
    pub color: [u8; 3],
}

impl PaintCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (x, y, color) = match tokens.as_slice() {
            [x, y, hex] => (*x, *y, parse_hex_color(hex)?),
            [x, y, r, g, b] => (*x, *y, [parse_channel(r)?, parse_channel(g)?, parse_channel(b)?]),
            _ => return Err(CommandError::Usage),
        };

        // Bounds are the server's call; only the syntax is checked here
        Ok(Self {
            x: parse_coordinate(x)?,
            y: parse_coordinate(y)?,
            color,
        })
    }

    pub fn to_message(self) -> PixelMessage {
        PixelMessage {
            pos: [self.x, self.y],
            color: self.color,
        }
    }
}

fn parse_coordinate(token: &str) -> Result<i64, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidCoordinate(token.to_string()))
}

fn parse_channel(token: &str) -> Result<u8, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidColor(token.to_string()))
}

fn parse_hex_color(token: &str) -> Result<[u8; 3], CommandError> {
    let invalid = || CommandError::InvalidColor(token.to_string());
    let hex = token.strip_prefix('#').unwrap_or(token);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(invalid)
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
