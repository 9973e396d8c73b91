//! Scene container: the object and light lists.

use crate::hittable::{Hittable, Intersection};
use crate::light::Light;
use lux_math::{Ray, Vec3};

/// Objects and lights to render.
///
/// Built single-threaded before rendering and shared read-only by every
/// worker afterwards.
#[derive(Default)]
pub struct Scene {
    pub objects: Vec<Box<dyn Hittable>>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: impl Hittable + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn add_lights(&mut self, lights: impl IntoIterator<Item = Light>) {
        self.lights.extend(lights);
    }

    /// Nearest intersection across every object, by distance to the ray origin.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Intersection<'_>> {
        self.objects
            .iter()
            .filter_map(|object| object.intersect(ray))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Whether any object blocks the segment from `point` to `light`.
    ///
    /// Only hits strictly closer than the light count as occluders.
    pub fn occluded(&self, point: Vec3, light: &Light) -> bool {
        let shadow_ray = Ray::between(point, light.center);
        let light_distance = light.distance(point);

        self.objects
            .iter()
            .filter_map(|object| object.intersect(&shadow_ray))
            .any(|hit| hit.distance < light_distance)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects.len())
            .field("lights", &self.lights.len())
            .finish()
    }
}
