//! Canvas entity: the authoritative pixel grid.

use super::{
    error::CanvasError,
    value_object::{Color, Dimensions, Pixel, Position},
};

const CHANNELS: usize = 3;

/// `width × height` grid of RGB colors, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    dimensions: Dimensions,
    rgb: Vec<u8>,
}

impl Canvas {
    /// Create a canvas with every pixel set to white
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        let dimensions = Dimensions::new(width, height);
        if dimensions.area() == 0 {
            return Err(CanvasError::EmptyDimensions(dimensions));
        }

        let rgb = Color::WHITE
            .to_array()
            .into_iter()
            .cycle()
            .take(dimensions.area() * CHANNELS)
            .collect();

        Ok(Self { dimensions, rgb })
    }

    /// Rebuild a canvas from row-major 8-bit RGB data
    pub fn from_rgb(dimensions: Dimensions, rgb: Vec<u8>) -> Result<Self, CanvasError> {
        if dimensions.area() == 0 {
            return Err(CanvasError::EmptyDimensions(dimensions));
        }

        let expected = dimensions.area() * CHANNELS;
        if rgb.len() != expected {
            return Err(CanvasError::BufferSizeMismatch {
                dimensions,
                expected,
                actual: rgb.len(),
            });
        }

        Ok(Self { dimensions, rgb })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn is_in_bounds(&self, x: i64, y: i64) -> bool {
        self.dimensions.contains(Position::new(x, y))
    }

    /// Set the color at the pixel's position.
    ///
    /// Admission (bounds checking) is the caller's job. A position outside the
    /// grid is ignored instead of being wrapped into another row.
    pub fn paint(&mut self, pixel: Pixel) {
        let Some(offset) = self.offset(pixel.position) else {
            tracing::warn!("Ignoring paint outside of the canvas at {:?}", pixel.position);
            return;
        };
        self.rgb[offset..offset + CHANNELS].copy_from_slice(&pixel.color.to_array());
    }

    pub fn color_at(&self, position: Position) -> Option<Color> {
        let offset = self.offset(position)?;
        let [r, g, b] = [self.rgb[offset], self.rgb[offset + 1], self.rgb[offset + 2]];
        Some(Color::new(r, g, b))
    }

    /// Row-major 8-bit RGB data
    pub fn as_rgb(&self) -> &[u8] {
        &self.rgb
    }

    fn offset(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        let index = position.y as usize * self.dimensions.width as usize + position.x as usize;
        Some(index * CHANNELS)
    }
}
