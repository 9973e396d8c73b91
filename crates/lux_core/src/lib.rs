//! Lux Core - colors, materials, textures and image buffers.
//!
//! This crate provides:
//!
//! - **Color**: linear RGB radiance with tone mapping and gamma helpers
//! - **Material**: Phong-style surface parameters with optional texture lookup
//! - **Texture**: the texture provider interface, PNG loading and caching
//! - **Buffer**: the output pixel buffer and PNG persistence
//!
//! # Example
//!
//! ```ignore
//! use lux_core::{Color, Material, TextureCache, DEFAULT_GAMMA};
//!
//! let mut cache = TextureCache::new(DEFAULT_GAMMA);
//! let wood = Material::new(Color::BLACK, Color::WHITE, Color::splat(0.5))
//!     .with_phong(15.0)
//!     .with_texture_or_white(cache.load("wood.png"));
//! ```

pub mod buffer;
pub mod color;
pub mod material;
pub mod texture;

// Re-export commonly used types
pub use color::{Color, DEFAULT_GAMMA};
pub use buffer::{save_png, ImageBuffer};
pub use material::Material;
pub use texture::{load_png, Texture, TextureCache, TextureError, TextureLookup, TextureResult};
