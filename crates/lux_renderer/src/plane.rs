//! Bounded plane (quad) primitive.

use crate::hittable::{Hittable, Intersection};
use lux_core::Material;
use lux_math::{Interval, Mat4, Mat4Ext, Ray, Vec3, EPSILON};

/// A rectangle placed in the world by an affine transform.
///
/// In its local frame the quad lies in the XY plane, centered on the origin,
/// spanning `width` along X and `height` along Y, with the normal along +Z.
#[derive(Debug, Clone)]
pub struct Plane {
    /// World-space unit normal
    normal: Vec3,
    /// Plane equation offset: `normal . p + offset == 0` for points on the plane
    offset: f32,
    /// World-to-local transform, `None` for a degenerate placement
    world_to_local: Option<Mat4>,
    /// Local X extent
    bounds_u: Interval,
    /// Local Y extent
    bounds_v: Interval,
    material: Material,
}

impl Plane {
    /// Create a quad from its local-to-world transform.
    ///
    /// The world normal is the image of local +Z, or local -Z when
    /// `inverse_normal` is set. A transform that cannot be inverted, or a
    /// zero-sized quad, yields a plane that is never hit.
    pub fn new(transform: Mat4, width: f32, height: f32, material: Material, inverse_normal: bool) -> Self {
        let center = transform.transform_point3(Vec3::ZERO);
        let top_left = transform.transform_point3(Vec3::new(-width / 2.0, height / 2.0, 0.0)) - center;
        let top_right = transform.transform_point3(Vec3::new(width / 2.0, height / 2.0, 0.0)) - center;

        // top_left x top_right points along local -Z
        let mut normal = top_left.cross(top_right);
        if !inverse_normal {
            normal = -normal;
        }
        let normal = normal.normalize();

        let world_to_local = if normal.is_finite() { transform.try_inverse() } else { None };
        if world_to_local.is_none() {
            log::warn!("Degenerate plane transform, plane will never be hit");
        }

        Self {
            normal,
            offset: -normal.dot(center),
            world_to_local,
            bounds_u: Interval::centered(width),
            bounds_v: Interval::centered(height),
            material,
        }
    }

    /// World-space unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let world_to_local = self.world_to_local.as_ref()?;

        let denom = self.normal.dot(ray.direction());
        // Ray parallel to the plane
        if denom.abs() < EPSILON {
            return None;
        }

        let t = -(self.offset + self.normal.dot(ray.origin())) / denom;
        // Behind the origin, or the surface the ray just left
        if t < EPSILON {
            return None;
        }

        let point = ray.at(t);
        let local = world_to_local.transform_point3(point);

        // Boundary inclusive, tolerant by EPSILON
        if !self.bounds_u.pad(EPSILON).contains(local.x) || !self.bounds_v.pad(EPSILON).contains(local.y) {
            return None;
        }

        // Texture rows run top to bottom, local +Y is up
        let u = self.bounds_u.normalized(local.x);
        let v = 1.0 - self.bounds_v.normalized(local.y);
        let texel = self.material.get_color(u, v);

        Some(Intersection::new(ray, point, self.normal, texel, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{Color, Texture};
    use std::f32::consts::PI;
    use std::sync::Arc;

    fn unit_quad() -> Plane {
        Plane::new(Mat4::IDENTITY, 2.0, 2.0, Material::default(), false)
    }

    fn down_from(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 5.0), -Vec3::Z)
    }

    #[test]
    fn test_plane_hit() {
        let quad = unit_quad();
        let hit = quad.intersect(&down_from(0.25, -0.5)).unwrap();

        assert!((hit.point - Vec3::new(0.25, -0.5, 0.0)).length() < 1e-5);
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);
        assert_eq!(hit.texel, Color::WHITE);
        assert!((hit.reflect_ray.direction() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_plane_edge_is_inside() {
        let quad = unit_quad();

        assert!(quad.intersect(&down_from(1.0, 0.0)).is_some());
        assert!(quad.intersect(&down_from(-1.0, 1.0)).is_some());
        assert!(quad.intersect(&down_from(1.0 + EPSILON * 0.5, 0.0)).is_some());
        assert!(quad.intersect(&down_from(0.0, -1.0 - EPSILON * 0.5)).is_some());

        assert!(quad.intersect(&down_from(1.01, 0.0)).is_none());
        assert!(quad.intersect(&down_from(0.0, -1.01)).is_none());
    }

    #[test]
    fn test_plane_rejects_parallel_and_behind() {
        let quad = unit_quad();

        let parallel = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert!(quad.intersect(&parallel).is_none());

        let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(quad.intersect(&away).is_none());

        // Starting on the surface does not re-hit it
        let on_surface = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(quad.intersect(&on_surface).is_none());
    }

    #[test]
    fn test_plane_hit_from_below_keeps_normal() {
        let from_below = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        let quad = unit_quad();
        let hit = quad.intersect(&from_below).unwrap();

        assert_eq!(hit.normal, Vec3::Z);
        assert!((hit.distance - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_inverse_normal() {
        let quad = Plane::new(Mat4::IDENTITY, 2.0, 2.0, Material::default(), true);
        assert_eq!(quad.normal(), -Vec3::Z);
    }

    #[test]
    fn test_transformed_plane() {
        // A wall at x = -6 facing +X
        let m = Mat4::from_translation(Vec3::new(-6.0, 0.0, 0.0)) * Mat4::from_rotation_y(PI / 2.0);
        let wall = Plane::new(m, 12.0, 12.0, Material::default(), false);

        assert!((wall.normal() - Vec3::X).length() < 1e-5);

        let ray = Ray::new(Vec3::new(10.0, 3.0, -2.0), -Vec3::X);
        let hit = wall.intersect(&ray).unwrap();
        assert!((hit.point - Vec3::new(-6.0, 3.0, -2.0)).length() < 1e-4);
        assert!((hit.distance - 16.0).abs() < 1e-4);

        let outside = Ray::new(Vec3::new(10.0, 6.5, 0.0), -Vec3::X);
        assert!(wall.intersect(&outside).is_none());
    }

    #[test]
    fn test_plane_texture_uv() {
        let tex = Arc::new(Texture::checker(2, Color::BLACK, Color::WHITE));
        let quad = Plane::new(Mat4::IDENTITY, 2.0, 2.0, Material::default().with_texture(tex), false);

        // Top-left quadrant maps to the first texture cell
        assert_eq!(quad.intersect(&down_from(-0.5, 0.5)).unwrap().texel, Color::BLACK);
        assert_eq!(quad.intersect(&down_from(0.5, 0.5)).unwrap().texel, Color::WHITE);
        assert_eq!(quad.intersect(&down_from(-0.5, -0.5)).unwrap().texel, Color::WHITE);
        assert_eq!(quad.intersect(&down_from(0.5, -0.5)).unwrap().texel, Color::BLACK);
    }

    #[test]
    fn test_degenerate_transform_never_hits() {
        let flat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        let quad = Plane::new(flat, 2.0, 2.0, Material::default(), false);

        assert!(quad.intersect(&down_from(0.0, 0.0)).is_none());
    }
}
