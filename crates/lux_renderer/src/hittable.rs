//! Hittable trait and Intersection record for ray-object intersection.

use lux_core::{Color, Material};
use lux_math::{reflect, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Created fresh by every successful intersection test; a miss is simply
/// `None`, so there is no partially filled record to misread.
#[derive(Debug, Clone)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at the intersection (unit length, not flipped towards the ray)
    pub normal: Vec3,
    /// Distance from the ray origin to `point`
    pub distance: f32,
    /// Mirror ray leaving `point`
    pub reflect_ray: Ray,
    /// Transmitted ray, `None` when the material does not refract.
    /// Under total internal reflection this is the mirror ray.
    pub refract_ray: Option<Ray>,
    /// Fresnel reflectance in [0, 1]; 1 for opaque surfaces
    pub reflect_amount: f32,
    /// Texture sample at the hit, white for untextured surfaces
    pub texel: Color,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> Intersection<'a> {
    /// Build a record for a hit, deriving the secondary rays.
    pub fn new(ray: &Ray, point: Vec3, normal: Vec3, texel: Color, material: &'a Material) -> Self {
        let (reflect_ray, refract_ray, reflect_amount) =
            reflect_refract(ray.direction(), point, normal, material);

        Self {
            point,
            normal,
            distance: point.distance(ray.origin()),
            reflect_ray,
            refract_ray,
            reflect_amount,
            texel,
            material,
        }
    }

    /// Fraction of energy transmitted rather than reflected.
    pub fn transmittance(&self) -> f32 {
        1.0 - self.reflect_amount
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest valid intersection along the ray, if any.
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>>;
}

/// Derive the reflected ray, the refracted ray and the Fresnel reflectance.
///
/// `incoming` is the unit direction of the arriving ray, `normal` the unit
/// surface normal at `point`.
pub fn reflect_refract(
    incoming: Vec3,
    point: Vec3,
    normal: Vec3,
    material: &Material,
) -> (Ray, Option<Ray>, f32) {
    let reflect_ray = Ray::new(point, reflect(incoming, normal).normalize());

    if !material.refracts() {
        return (reflect_ray, None, 1.0);
    }

    let mut n = normal;
    let mut coef = material.refract_coef;
    let mut cos_i = -incoming.dot(n);

    // Leaving the medium: face the normal against the ray and invert the ratio
    if cos_i < 0.0 {
        n = -n;
        cos_i = -incoming.dot(n);
        coef = 1.0 / coef;
    }

    let sin2_t = coef * coef * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        // Total internal reflection
        return (reflect_ray, Some(reflect_ray), 1.0);
    }

    let cos_t = (1.0 - sin2_t).sqrt();
    let direction = (incoming * coef + n * (coef * cos_i - cos_t)).normalize();

    let r_perp = (cos_i - coef * cos_t) / (cos_i + coef * cos_t);
    let r_par = (coef * cos_i - cos_t) / (coef * cos_i + cos_t);
    let reflectance = (r_perp * r_perp + r_par * r_par) / 2.0;

    (reflect_ray, Some(Ray::new(point, direction)), reflectance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glass(coef: f32) -> Material {
        Material::default().with_refraction(1.0, coef)
    }

    #[test]
    fn test_opaque_has_no_refract_ray() {
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let (reflected, refracted, r) = reflect_refract(incoming, Vec3::ZERO, Vec3::Y, &Material::default());

        assert!(refracted.is_none());
        assert_eq!(r, 1.0);
        assert!((reflected.direction() - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_matched_index_passes_straight_through() {
        let incoming = Vec3::new(0.3, -1.0, 0.2).normalize();
        let (_, refracted, r) = reflect_refract(incoming, Vec3::ZERO, Vec3::Y, &glass(1.0));

        let refracted = refracted.unwrap();
        assert!((refracted.direction() - incoming).length() < 1e-5);
        assert!(r.abs() < 1e-6);
    }

    #[test]
    fn test_normal_incidence_reflectance() {
        // Air into glass: ((1 - 1/1.5) / (1 + 1/1.5))^2 = 0.04
        let (_, refracted, r) = reflect_refract(-Vec3::Y, Vec3::ZERO, Vec3::Y, &glass(1.0 / 1.5));

        assert!((r - 0.04).abs() < 1e-4);
        assert!((refracted.unwrap().direction() + Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_refraction_bends_towards_normal_entering_denser() {
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let (_, refracted, r) = reflect_refract(incoming, Vec3::ZERO, Vec3::Y, &glass(1.0 / 1.5));
        let d = refracted.unwrap().direction();

        assert!((d.length() - 1.0).abs() < 1e-5);
        assert!(d.y < 0.0);
        // sin(theta_t) = sin(45deg) / 1.5
        assert!((d.x - (0.5f32.sqrt() / 1.5)).abs() < 1e-4);
        assert!(r > 0.0 && r < 1.0);
    }

    #[test]
    fn test_exiting_ray_flips_normal_and_ratio() {
        // Ray travelling with the normal leaves the medium: ratio becomes 1.5
        let incoming = Vec3::new(0.2, 1.0, 0.0).normalize();
        let (_, refracted, _) = reflect_refract(incoming, Vec3::ZERO, Vec3::Y, &glass(1.0 / 1.5));
        let d = refracted.unwrap().direction();

        assert!(d.y > 0.0);
        assert!(d.x > incoming.x);
    }

    #[test]
    fn test_total_internal_reflection() {
        // Grazing exit from glass: 1.5 * sin(80deg) > 1
        let incoming = Vec3::new(80f32.to_radians().sin(), 80f32.to_radians().cos(), 0.0);
        let (reflected, refracted, r) = reflect_refract(incoming, Vec3::ZERO, Vec3::Y, &glass(1.0 / 1.5));

        assert_eq!(r, 1.0);
        assert_eq!(refracted, Some(reflected));
    }
}
