//! Surface reflectance parameters.

use std::sync::Arc;

use crate::texture::{Texture, TextureLookup, TextureResult};
use crate::Color;

/// Phong-style material with absorption and refraction.
///
/// Materials are immutable once a scene is built and are shared read-only
/// by every render worker.
#[derive(Clone, Debug)]
pub struct Material {
    /// Constant term added regardless of lighting
    pub ambient: Color,

    /// Diffuse reflectance, multiplied by the texture sample
    pub diffuse: Color,

    /// Specular reflectance
    pub specular: Color,

    /// Absorption coefficient; mirror contribution is scaled by `exp(-beta)`
    pub beta: f32,

    /// Specular exponent
    pub phong: f32,

    /// Fraction of transmitted light that is traced, in [0, 1].
    /// Zero disables refraction entirely.
    pub refract_amount: f32,

    /// Ratio of refractive indices (incident / transmitted) when entering
    pub refract_coef: f32,

    /// Optional texture sampled by UV
    pub texture: Option<Arc<dyn TextureLookup>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::BLACK,
            diffuse: Color::splat(0.5),
            specular: Color::BLACK,
            beta: 0.0,
            phong: 1.0,
            refract_amount: 0.0,
            refract_coef: 1.0,
            texture: None,
        }
    }
}

impl Material {
    /// Create an opaque material from its three color terms.
    ///
    /// Absorption defaults to `0`, the phong exponent to `1` and refraction
    /// is disabled.
    pub fn new(ambient: Color, diffuse: Color, specular: Color) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            ..Default::default()
        }
    }

    /// Set the absorption coefficient.
    pub fn with_absorption(mut self, beta: f32) -> Self {
        self.beta = beta;
        self
    }

    /// Set the specular exponent.
    pub fn with_phong(mut self, phong: f32) -> Self {
        self.phong = phong;
        self
    }

    /// Enable refraction. `amount` is clamped to [0, 1].
    pub fn with_refraction(mut self, amount: f32, coef: f32) -> Self {
        self.refract_amount = amount.clamp(0.0, 1.0);
        self.refract_coef = coef;
        self
    }

    /// Bind a texture.
    pub fn with_texture(mut self, texture: Arc<dyn TextureLookup>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Bind a texture if it loaded, otherwise keep the material untextured.
    ///
    /// A failed load is logged and the surface renders as if the texture
    /// were constant white.
    pub fn with_texture_or_white(self, texture: TextureResult<Arc<Texture>>) -> Self {
        match texture {
            Ok(texture) => self.with_texture(texture),
            Err(e) => {
                log::warn!("{}, falling back to white", e);
                self
            }
        }
    }

    /// Check if refracted rays should be traced for this material.
    pub fn refracts(&self) -> bool {
        self.refract_amount > 0.0
    }

    /// Texture color at `(u, v)`, white when no texture is bound.
    pub fn get_color(&self, u: f32, v: f32) -> Color {
        match &self.texture {
            Some(texture) => texture.lookup(u, v),
            None => Color::WHITE,
        }
    }
}
