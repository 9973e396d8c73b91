//! Texture loading and caching for materials.
//!
//! The renderer only sees textures through [`TextureLookup`]. This module
//! also provides the PNG-backed implementation and a cache so that several
//! surfaces can share one decoded image.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lux_math::Interval;
use thiserror::Error;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save image {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(PathBuf),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Pixel lookup by normalized UV.
///
/// Implementations must clamp out-of-range coordinates to the nearest edge
/// pixel rather than wrap or fail.
pub trait TextureLookup: Send + Sync + Debug {
    /// Color at `(u, v)`, both nominally in [0, 1].
    fn lookup(&self, u: f32, v: f32) -> Color;
}

/// A decoded texture with linear pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Linear colors, row-major
    pub pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    ///
    /// `pixels` must hold `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self::new(1, 1, vec![color], "<solid>")
    }

    /// Procedural checkerboard with `cells` squares along each side.
    pub fn checker(cells: u32, a: Color, b: Color) -> Self {
        let cells = cells.max(1);
        let pixels = (0..cells * cells)
            .map(|i| if (i % cells + i / cells) % 2 == 0 { a } else { b })
            .collect();
        Self::new(cells, cells, pixels, "<checker>")
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(Color::WHITE)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

impl TextureLookup for Texture {
    /// Nearest-pixel lookup, clamped to the edges.
    fn lookup(&self, u: f32, v: f32) -> Color {
        let u = Interval::UNIT.clamp(u);
        let v = Interval::UNIT.clamp(v);

        // u == 1.0 maps one past the last column, pull it back in.
        // An empty texture falls through to white in get_pixel.
        let x = ((u * self.width as f32) as u32).min(self.width.saturating_sub(1));
        let y = ((v * self.height as f32) as u32).min(self.height.saturating_sub(1));

        self.get_pixel(x, y)
    }
}

/// Load a PNG (or any format the `image` crate decodes) as a linear texture.
///
/// Each 8-bit channel is decoded as `(byte / 255) ^ gamma`; pass `1.0` to keep
/// the stored values as they are.
pub fn load_png(path: impl AsRef<Path>, gamma: f32) -> TextureResult<Texture> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| TextureError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty(path.to_path_buf()));
    }

    let pixels = rgb
        .pixels()
        .map(|p| Color::from_rgb8(p.0).gamma_decoded(gamma))
        .collect();

    Ok(Texture::new(
        width,
        height,
        pixels,
        path.to_string_lossy().to_string(),
    ))
}

/// Cache for loaded textures.
///
/// Textures are loaded on-demand and cached for reuse.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Gamma used to decode every texture this cache loads
    gamma: f32,
}

impl TextureCache {
    /// Create a new empty texture cache decoding with `gamma`.
    pub fn new(gamma: f32) -> Self {
        Self {
            textures: HashMap::new(),
            gamma,
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let texture = Arc::new(load_png(path, self.gamma)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Check if a texture is cached.
    pub fn is_cached(&self, path: &str) -> bool {
        self.textures.contains_key(path)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let img = image::RgbImage::from_fn(2, 2, |x, y| match (x, y) {
            (0, 0) => image::Rgb([255, 0, 0]),
            (1, 0) => image::Rgb([0, 255, 0]),
            (0, 1) => image::Rgb([0, 0, 255]),
            _ => image::Rgb([255, 255, 255]),
        });
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Color::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width, 1);
        assert_eq!(tex.lookup(0.5, 0.5), Color::new(1.0, 0.5, 0.0));
        assert_eq!(tex.lookup(1.0, 1.0), Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_lookup_clamps_to_edges() {
        let tex = Texture::checker(2, Color::BLACK, Color::WHITE);

        assert_eq!(tex.lookup(0.0, 0.0), Color::BLACK);
        assert_eq!(tex.lookup(0.99, 0.0), Color::WHITE);
        assert_eq!(tex.lookup(1.0, 1.0), Color::BLACK);
        // Out of range behaves like the nearest edge
        assert_eq!(tex.lookup(-3.0, -3.0), tex.lookup(0.0, 0.0));
        assert_eq!(tex.lookup(7.0, -1.0), tex.lookup(1.0, 0.0));
    }

    #[test]
    fn test_empty_texture_reads_white() {
        let empty = Texture::new(0, 0, Vec::new(), "<empty>");
        assert_eq!(empty.lookup(0.0, 0.0), Color::WHITE);
        assert_eq!(empty.lookup(1.0, 1.0), Color::WHITE);
    }

    #[test]
    fn test_load_png_decodes_with_gamma() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "quad.png");

        let raw = load_png(&path, 1.0).unwrap();
        assert_eq!((raw.width, raw.height), (2, 2));
        assert_eq!(raw.lookup(0.0, 0.0), Color::new(1.0, 0.0, 0.0));
        assert_eq!(raw.lookup(1.0, 0.0), Color::new(0.0, 1.0, 0.0));
        assert_eq!(raw.lookup(0.0, 1.0), Color::new(0.0, 0.0, 1.0));

        // Primaries and white are fixed points of any gamma
        let decoded = load_png(&path, 2.2).unwrap();
        assert_eq!(decoded.lookup(1.0, 1.0), Color::WHITE);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_png("does/not/exist.png", 2.2).unwrap_err();
        assert!(matches!(err, TextureError::Load { .. }));
    }

    #[test]
    fn test_texture_cache() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "cached.png");
        let key = path.to_string_lossy().to_string();

        let mut cache = TextureCache::new(1.0);
        assert!(cache.is_empty());

        let first = cache.load(&key).unwrap();
        let second = cache.load(&key).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_cached(&key));
        assert_eq!(cache.len(), 1);

        assert!(cache.load("missing.png").is_err());
        assert_eq!(cache.len(), 1);
    }
}
