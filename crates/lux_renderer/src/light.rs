//! Point lights.

use lux_core::Color;
use lux_math::{Ray, Vec3};

/// Radius given to each light of a [`Light::grid`].
pub const GRID_LIGHT_RADIUS: f32 = 0.1;

/// A point light with an inclusion radius.
///
/// The radius plays no part in shading; it only decides whether a ray
/// "sees" the light when light positions are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub center: Vec3,
    pub color: Color,
    pub radius: f32,
}

impl Light {
    pub fn new(center: Vec3, color: Color, radius: f32) -> Self {
        Self {
            center,
            color,
            radius: radius.max(0.0),
        }
    }

    /// A `count` x `count` grid of dim lights spaced `step` apart in the XY
    /// plane, starting at `origin`. Approximates a soft area light.
    pub fn grid(origin: Vec3, count: u32, step: f32, color: Color) -> Vec<Light> {
        let mut lights = Vec::with_capacity((count * count) as usize);
        for i in 0..count {
            for j in 0..count {
                let offset = Vec3::new(i as f32 * step, j as f32 * step, 0.0);
                lights.push(Light::new(origin + offset, color, GRID_LIGHT_RADIUS));
            }
        }
        lights
    }

    /// Whether the line of `ray` passes within `radius` of the center.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        let to_center = self.center - ray.origin();
        let closest = to_center.cross(ray.direction()).length() / ray.direction().length();
        closest <= self.radius
    }

    /// Euclidean distance from the light to `point`.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.center.distance(point)
    }
}
