//! Pinhole camera and its image-plane viewport.

use crate::error::ConfigError;
use lux_math::{Ray, Vec3};

/// A rectangle in world space that primary rays pass through.
///
/// Corners are named as seen from the camera: image row 0 runs from
/// `top_left` to `top_right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top_left: Vec3,
    pub top_right: Vec3,
    pub bottom_left: Vec3,
    pub bottom_right: Vec3,
}

impl Viewport {
    pub fn new(top_left: Vec3, top_right: Vec3, bottom_left: Vec3, bottom_right: Vec3) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Bilinear point on the viewport; `u` runs left to right, `v` top to bottom.
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        let top = self.top_left.lerp(self.top_right, u);
        let bottom = self.bottom_left.lerp(self.bottom_right, u);
        top.lerp(bottom, v)
    }

    pub fn center(&self) -> Vec3 {
        self.point_at(0.5, 0.5)
    }
}

/// Camera for generating primary rays.
#[derive(Debug, Clone)]
pub struct Camera {
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    /// Viewport width in world units
    viewport_width: f32,
    /// Distance from the eye to the viewport
    focal_distance: f32,

    /// Explicit viewport, overriding the derived one
    viewport: Option<Viewport>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Create a camera at the origin looking down -Z with Y up.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            viewport_width: 2.0,
            focal_distance: 1.0,
            viewport: None,
        }
    }

    /// Use a fixed eye and viewport instead of deriving one.
    pub fn from_viewport(eye: Vec3, viewport: Viewport) -> Self {
        Self {
            look_from: eye,
            look_at: viewport.center(),
            viewport: Some(viewport),
            ..Self::new()
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the viewport width and its distance from the eye.
    pub fn with_lens(mut self, viewport_width: f32, focal_distance: f32) -> Self {
        self.viewport_width = viewport_width;
        self.focal_distance = focal_distance;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.look_from
    }

    /// Reject poses and lenses that would yield NaN or empty primary rays.
    ///
    /// A fixed viewport is taken as given.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.is_some() {
            return Ok(());
        }

        let forward = (self.look_at - self.look_from)
            .try_normalize()
            .ok_or(ConfigError::DegenerateCamera("look_from and look_at coincide"))?;
        if forward.cross(self.vup).try_normalize().is_none() {
            return Err(ConfigError::DegenerateCamera("vup is parallel to the view direction"));
        }
        if !(self.viewport_width > 0.0 && self.focal_distance > 0.0) {
            return Err(ConfigError::DegenerateCamera("lens width and focal distance must be positive"));
        }
        Ok(())
    }

    /// Viewport for an image with the given width / height ratio.
    pub fn viewport(&self, aspect: f32) -> Viewport {
        if let Some(viewport) = self.viewport {
            return viewport;
        }

        let forward = (self.look_at - self.look_from).normalize();
        let right = forward.cross(self.vup).normalize();
        let up = right.cross(forward);

        let half_w = right * (self.viewport_width / 2.0);
        let half_h = up * (self.viewport_width / aspect / 2.0);
        let center = self.look_from + forward * self.focal_distance;

        Viewport::new(
            center - half_w + half_h,
            center + half_w + half_h,
            center - half_w - half_h,
            center + half_w - half_h,
        )
    }

    /// Primary ray from the eye through a point on the viewport.
    pub fn ray_through(&self, point: Vec3) -> Ray {
        Ray::between(self.look_from, point)
    }
}
