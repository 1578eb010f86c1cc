//! Message formatting utilities for client display.

use hekiga_server::{domain::Dimensions, infrastructure::dto::websocket::PixelMessage};
use hekiga_shared::time::timestamp_to_jst_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the snapshot received when a session opens
    ///
    /// # Arguments
    ///
    /// * `dimensions` - Canvas size decoded from the snapshot
    /// * `byte_count` - Size of the encoded snapshot
    pub fn format_snapshot(dimensions: Dimensions, byte_count: usize) -> String {
        format!(
            "\n\n============================================================\n\
             Canvas {} ({} bytes)\n\
             Type `x y #rrggbb` or `x y r g b` and press Enter to paint.\n\
             ============================================================\n",
            dimensions, byte_count
        )
    }

    /// Format a pixel update pushed by the server
    ///
    /// # Arguments
    ///
    /// * `pixel` - The pixel that was painted
    /// * `received_at` - Unix timestamp when the update arrived (milliseconds)
    pub fn format_pixel(pixel: &PixelMessage, received_at: i64) -> String {
        let [x, y] = pixel.pos;
        let [r, g, b] = pixel.color;
        format!(
            "\n* ({}, {}) #{:02x}{:02x}{:02x} at {}\n",
            x,
            y,
            r,
            g,
            b,
            timestamp_to_jst_rfc3339(received_at)
        )
    }

    pub fn format_sent_confirmation(pixel: &PixelMessage) -> String {
        let [x, y] = pixel.pos;
        format!("sent ({}, {})\n", x, y)
    }

    /// Format a close frame sent by the server
    pub fn format_closed(code: u16, reason: &str) -> String {
        if reason.is_empty() {
            format!("\n× Server closed the session (code {})\n", code)
        } else {
            format!("\n× Server closed the session (code {}): {}\n", code, reason)
        }
    }

    /// Format a text frame that is not a pixel update
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
