//! Linear RGB color accumulator.
//!
//! Colors are unclamped radiance while light is being accumulated. Tone
//! mapping, gamma and saturation are explicit terminal steps, applied once
//! per pixel by the renderer or by an image sink.

use std::iter::Sum;
use std::ops::{Add, AddAssign, BitXor, Div, Mul, Sub};

use lux_math::Vec3;

/// Display gamma used for encoding output pixels and decoding texture bytes.
pub const DEFAULT_GAMMA: f32 = 2.2;

/// Rec. 601 luma weights.
const LUMA: Vec3 = Vec3::new(0.299, 0.587, 0.114);

/// Linear RGB radiance, stored as a glam vector (x = r, y = g, z = b).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color(pub Vec3);

impl Color {
    pub const BLACK: Color = Color(Vec3::ZERO);
    pub const WHITE: Color = Color(Vec3::ONE);

    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self(Vec3::new(r, g, b))
    }

    /// Create a grey color with every channel set to `c`.
    pub const fn splat(c: f32) -> Self {
        Self(Vec3::splat(c))
    }

    /// Convert 8-bit channels to [0, 1] floats (no gamma applied).
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self(Vec3::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0)
    }

    pub fn r(&self) -> f32 {
        self.0.x
    }

    pub fn g(&self) -> f32 {
        self.0.y
    }

    pub fn b(&self) -> f32 {
        self.0.z
    }

    /// Exact test for (0, 0, 0).
    ///
    /// Used to skip light accumulation for a zero material channel.
    pub fn is_black(&self) -> bool {
        self.0 == Vec3::ZERO
    }

    /// Perceptual luminance.
    pub fn luminance(&self) -> f32 {
        self.0.dot(LUMA)
    }

    /// Reinhard-style tone mapping: `c / (luminance + 1)`.
    pub fn tone_mapped(self) -> Self {
        self / (self.luminance() + 1.0)
    }

    /// Encode linear radiance for display: `c ^ (1 / gamma)`.
    pub fn gamma_encoded(self, gamma: f32) -> Self {
        self ^ (1.0 / gamma)
    }

    /// Decode display values back to linear radiance: `c ^ gamma`.
    pub fn gamma_decoded(self, gamma: f32) -> Self {
        self ^ gamma
    }

    /// Clamp each channel to [0, 1].
    pub fn saturated(self) -> Self {
        Self(self.0.clamp(Vec3::ZERO, Vec3::ONE))
    }

    /// Saturate and quantize to 8-bit RGBA with an opaque alpha.
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = (self.saturated().0 * 255.0).round();
        [c.x as u8, c.y as u8, c.z as u8, 255]
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Self(v)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        Color(self.0 - rhs.0)
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color(self.0 * rhs.0)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, k: f32) -> Color {
        Color(self.0 * k)
    }
}

impl Div<f32> for Color {
    type Output = Color;

    fn div(self, k: f32) -> Color {
        Color(self.0 / k)
    }
}

/// Per-channel power.
impl BitXor<f32> for Color {
    type Output = Color;

    fn bitxor(self, k: f32) -> Color {
        Color(self.0.powf(k))
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        Color(iter.map(|c| c.0).sum())
    }
}
