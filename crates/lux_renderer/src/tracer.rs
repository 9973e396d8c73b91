//! Recursive Whitted shading.
//!
//! Each hit is shaded with:
//! - Binary shadows and Phong-style direct lighting from every light
//! - A mirror ray attenuated by `exp(-beta) * R`
//! - A refracted ray weighted by `refract_amount * (1 - R)`

use std::ops::AddAssign;

use crate::config::RenderConfig;
use crate::hittable::Intersection;
use crate::scene::Scene;
use lux_core::Color;
use lux_math::{Ray, EPSILON};

/// Color seen along a ray plus the distance to what it hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traced {
    pub color: Color,
    /// Distance to the primary hit, `None` on a miss or past the depth bound
    pub distance: Option<f32>,
}

impl Traced {
    /// Background result.
    pub const MISS: Traced = Traced {
        color: Color::BLACK,
        distance: None,
    };
}

/// Ray counters kept per worker and merged at the end of a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Rays tested against the scene within the depth bound
    pub rays: u64,
    pub shadow_rays: u64,
    pub refraction_rays: u64,
}

impl AddAssign for TraceStats {
    fn add_assign(&mut self, other: Self) {
        self.rays += other.rays;
        self.shadow_rays += other.shadow_rays;
        self.refraction_rays += other.refraction_rays;
    }
}

/// Shading engine bound to one scene.
///
/// Not shared between threads: each worker owns a tracer so the counters
/// need no synchronization.
pub struct Tracer<'a> {
    scene: &'a Scene,
    max_depth: u32,
    show_lights: bool,
    stats: TraceStats,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &RenderConfig) -> Self {
        Self {
            scene,
            max_depth: config.max_depth,
            show_lights: config.show_lights,
            stats: TraceStats::default(),
        }
    }

    pub fn stats(&self) -> TraceStats {
        self.stats
    }

    /// Color arriving along `ray`, `depth` bounces away from the camera.
    pub fn trace(&mut self, ray: &Ray, depth: u32) -> Traced {
        if depth >= self.max_depth {
            return Traced::MISS;
        }
        self.stats.rays += 1;

        let scene = self.scene;
        let hit = scene.closest_hit(ray);

        if depth == 0 && self.show_lights {
            let limit = hit.as_ref().map_or(f32::INFINITY, |h| h.distance);
            if let Some(seen) = self.visible_light(ray, limit) {
                return seen;
            }
        }

        let Some(hit) = hit else {
            return Traced::MISS;
        };

        Traced {
            color: self.shade(&hit, depth),
            distance: Some(hit.distance),
        }
    }

    fn shade(&mut self, hit: &Intersection<'_>, depth: u32) -> Color {
        let material = hit.material;
        let (diffuse_light, specular_light) = self.direct_lighting(hit);

        let reflection = self.trace(&hit.reflect_ray, depth + 1).color
            * ((-material.beta).exp() * hit.reflect_amount);

        let mut refraction = Color::BLACK;
        let transmittance = hit.transmittance();
        if material.refracts() && transmittance > EPSILON {
            if let Some(refract_ray) = &hit.refract_ray {
                self.stats.refraction_rays += 1;
                refraction = self.trace(refract_ray, depth + 1).color
                    * (material.refract_amount * transmittance);
            }
        }

        material.ambient
            + material.diffuse * diffuse_light * hit.texel
            + material.specular * specular_light
            + reflection
            + refraction
    }

    /// Unshadowed light reaching the hit, as (diffuse, specular) sums.
    ///
    /// A light blocked by any object closer than the light contributes
    /// nothing.
    pub fn direct_lighting(&mut self, hit: &Intersection<'_>) -> (Color, Color) {
        let material = hit.material;
        let wants_diffuse = !material.diffuse.is_black();
        let wants_specular = !material.specular.is_black();

        let mut diffuse = Color::BLACK;
        let mut specular = Color::BLACK;
        if !wants_diffuse && !wants_specular {
            return (diffuse, specular);
        }

        let scene = self.scene;
        for light in &scene.lights {
            self.stats.shadow_rays += 1;
            if scene.occluded(hit.point, light) {
                continue;
            }

            let to_light = Ray::between(hit.point, light.center);
            let cos = to_light.direction().dot(hit.normal);
            if cos <= 0.0 {
                continue;
            }

            if wants_diffuse {
                diffuse += light.color * cos;
            }
            if wants_specular {
                specular += light.color * cos.powf(material.phong);
            }
        }

        (diffuse, specular)
    }

    /// Nearest light whose inclusion radius the ray passes before `limit`.
    fn visible_light(&self, ray: &Ray, limit: f32) -> Option<Traced> {
        self.scene
            .lights
            .iter()
            .filter(|light| light.intersects_ray(ray))
            .map(|light| (light, (light.center - ray.origin()).dot(ray.direction())))
            .filter(|(_, along)| *along > 0.0 && *along < limit)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(light, along)| Traced {
                color: light.color,
                distance: Some(along),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use crate::light::Light;
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use lux_core::Material;
    use lux_math::{Mat4, Vec3};

    fn config(max_depth: u32) -> RenderConfig {
        RenderConfig::default().with_quality(1, max_depth)
    }

    fn white() -> Material {
        Material::new(Color::BLACK, Color::WHITE, Color::WHITE).with_phong(4.0)
    }

    fn floor() -> Plane {
        Plane::new(Mat4::IDENTITY, 10.0, 10.0, white(), false)
    }

    fn lit_floor(occluder: bool) -> Scene {
        let mut scene = Scene::new();
        scene.add_object(floor());
        if occluder {
            scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, 2.5), 0.5, Material::default()));
        }
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Color::WHITE, 0.0));
        scene
    }

    #[test]
    fn test_occluder_zeroes_light_contribution() {
        let floor = floor();
        let hit = floor.intersect(&Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z)).unwrap();

        let open = lit_floor(false);
        let (diffuse, specular) = Tracer::new(&open, &config(1)).direct_lighting(&hit);
        assert!((diffuse.r() - 1.0).abs() < 1e-5);
        assert!((specular.g() - 1.0).abs() < 1e-5);

        let blocked = lit_floor(true);
        let (diffuse, specular) = Tracer::new(&blocked, &config(1)).direct_lighting(&hit);
        assert_eq!(diffuse, Color::BLACK);
        assert_eq!(specular, Color::BLACK);
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        let mut scene = Scene::new();
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, -5.0), Color::WHITE, 0.0));
        let floor = floor();
        let hit = floor.intersect(&Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z)).unwrap();

        let (diffuse, specular) = Tracer::new(&scene, &config(1)).direct_lighting(&hit);
        assert!(diffuse.is_black() && specular.is_black());
    }

    #[test]
    fn test_specular_uses_phong_exponent() {
        let scene = lit_floor(false);
        let floor = floor();
        // Point at (3, 0, 0): cos = 5 / sqrt(34)
        let hit = floor.intersect(&Ray::new(Vec3::new(3.0, 0.0, 1.0), -Vec3::Z)).unwrap();
        let (diffuse, specular) = Tracer::new(&scene, &config(1)).direct_lighting(&hit);

        let cos = 5.0 / 34f32.sqrt();
        assert!((diffuse.r() - cos).abs() < 1e-5);
        assert!((specular.r() - cos.powf(4.0)).abs() < 1e-5);
    }

    #[test]
    fn test_depth_bound_returns_black() {
        let scene = lit_floor(false);
        let mut tracer = Tracer::new(&scene, &config(2));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z);

        assert_eq!(tracer.trace(&ray, 2), Traced::MISS);
        assert_eq!(tracer.trace(&ray, 7), Traced::MISS);
        assert_eq!(tracer.stats().rays, 0);
    }

    #[test]
    fn test_miss_is_black_without_distance() {
        let scene = lit_floor(false);
        let mut tracer = Tracer::new(&scene, &config(3));
        let traced = tracer.trace(&Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z), 0);

        assert_eq!(traced, Traced::MISS);
    }

    #[test]
    fn test_primary_hit_reports_distance() {
        let scene = lit_floor(false);
        let mut tracer = Tracer::new(&scene, &config(1));
        let traced = tracer.trace(&Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z), 0);

        assert!((traced.distance.unwrap() - 2.0).abs() < 1e-5);
        // Diffuse 1 + specular 1, mirror term cut by the depth bound
        assert!((traced.color.r() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_opaque_never_traces_refraction() {
        let mut scene = Scene::new();
        scene.add_object(Sphere::new(Vec3::ZERO, 1.0, white()));
        scene.add_object(Plane::new(Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)), 20.0, 20.0, white(), false));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Color::WHITE, 0.0));

        let mut tracer = Tracer::new(&scene, &config(6));
        tracer.trace(&Ray::new(Vec3::new(0.3, 0.2, 5.0), -Vec3::Z), 0);

        assert!(tracer.stats().rays > 1);
        assert_eq!(tracer.stats().refraction_rays, 0);
    }

    #[test]
    fn test_glass_traces_refraction() {
        let mut scene = Scene::new();
        let glass = Material::default().with_refraction(1.0, 1.0 / 1.5);
        scene.add_object(Sphere::new(Vec3::ZERO, 1.0, glass));

        let mut tracer = Tracer::new(&scene, &config(4));
        tracer.trace(&Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z), 0);

        assert!(tracer.stats().refraction_rays > 0);
    }

    #[test]
    fn test_reflection_attenuated_by_absorption() {
        // A single plane: the mirror ray leaves it and misses
        let ambient = Material::new(Color::splat(0.5), Color::BLACK, Color::BLACK);
        let mut scene = Scene::new();
        scene.add_object(Plane::new(Mat4::IDENTITY, 10.0, 10.0, ambient.clone().with_absorption(1.0), false));

        let mut tracer = Tracer::new(&scene, &config(2));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z);
        assert_eq!(tracer.trace(&ray, 0).color, Color::splat(0.5));

        let mut mirror_box = Scene::new();
        mirror_box.add_object(Plane::new(Mat4::IDENTITY, 10.0, 10.0, ambient.clone().with_absorption(1.0), false));
        mirror_box.add_object(Plane::new(
            Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)),
            10.0,
            10.0,
            ambient,
            true,
        ));

        // Facing planes: the mirror ray picks up the ceiling's ambient
        let mut tracer = Tracer::new(&mirror_box, &config(2));
        let color = tracer.trace(&ray, 0).color;
        let expected = 0.5 + 0.5 * (-1.0f32).exp();
        assert!((color.r() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_show_lights() {
        let scene = lit_floor(false);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);

        let mut hidden = Tracer::new(&scene, &config(1));
        assert_eq!(hidden.trace(&ray, 0), Traced::MISS);

        let mut shown = Tracer::new(&scene, &config(1).with_show_lights(true));
        let traced = shown.trace(&ray, 0);
        assert_eq!(traced.color, Color::WHITE);
        assert!((traced.distance.unwrap() - 4.0).abs() < 1e-5);

        // A surface in front of the light hides it
        let occluded = lit_floor(true);
        let mut blocked = Tracer::new(&occluded, &config(1).with_show_lights(true));
        let traced = blocked.trace(&ray, 0);
        assert_ne!(traced.color, Color::WHITE);
        assert!((traced.distance.unwrap() - 1.0).abs() < 1e-4);
    }
}
