//! Sphere primitive for ray tracing.

use crate::hittable::{Hittable, Intersection};
use lux_core::{Color, Material};
use lux_math::{Ray, Vec3, EPSILON};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        // |O + tD - C|^2 = R^2 with unit D: t^2 + 2Bt + C = 0
        let oc = ray.origin() - self.center;
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - c;
        // Also rejects a NaN discriminant from a degenerate ray
        if !(discriminant >= 0.0) {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = -b - sqrtd;
        let far = -b + sqrtd;
        if far < 0.0 {
            return None;
        }

        // Nearest root in front of the origin; a root at the origin is the
        // surface the ray just left, so fall through to the far one
        let mut t = if near >= 0.0 { near } else { far };
        if t < EPSILON {
            t = far;
            if t < EPSILON {
                return None;
            }
        }

        let point = ray.at(t);
        let normal = (point - self.center).normalize();

        Some(Intersection::new(ray, point, normal, Color::WHITE, &self.material))
    }
}
