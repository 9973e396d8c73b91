//! Output pixel buffer and the PNG sink.

use std::path::Path;

use crate::texture::{TextureError, TextureResult};
use crate::Color;

/// Simple image buffer for storing render output.
///
/// Pixels are stored row-major; index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Row-major index of pixel (x, y).
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (saturated, no further gamma).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }
}

/// Quantize the buffer to 8 bits per channel and write it as a PNG.
///
/// The buffer is written as-is: apply tone mapping and gamma beforehand.
pub fn save_png(image: &ImageBuffer, path: impl AsRef<Path>) -> TextureResult<()> {
    let path = path.as_ref();
    image::save_buffer(
        path,
        &image.to_rgba8(),
        image.width,
        image.height,
        image::ColorType::Rgba8,
    )
    .map_err(|source| TextureError::Save {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
