//! Ready-made scenes.

use std::f32::consts::FRAC_PI_2;

use crate::camera::Camera;
use crate::cuboid::Cuboid;
use crate::light::Light;
use crate::plane::Plane;
use crate::scene::Scene;
use crate::sphere::Sphere;
use lux_core::{Color, Material};
use lux_math::{Mat4, Vec3};

/// Edge length of the open room.
pub const ROOM_SIZE: f32 = 12.0;

/// A unit sphere at the origin lit from above, seen from +X.
///
/// The sphere is pure-white diffuse. The point facing the camera is turned
/// away from the light, so a small ambient term keeps it distinguishable
/// from the black background.
pub fn single_sphere() -> (Scene, Camera) {
    let mut scene = Scene::new();
    let material = Material::new(Color::splat(0.05), Color::WHITE, Color::BLACK);
    scene.add_object(Sphere::new(Vec3::ZERO, 1.0, material));
    scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Color::WHITE, 0.1));

    let camera = Camera::new()
        .with_position(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::Z)
        .with_lens(2.0, 2.0);

    (scene, camera)
}

/// Base material of the room walls: white, glossy and strongly absorbing
/// so the walls barely mirror.
pub fn wall_material() -> Material {
    Material::new(Color::BLACK, Color::WHITE, Color::splat(0.5))
        .with_absorption(5.0)
        .with_phong(15.0)
}

/// A five-walled room, open towards the camera, holding a box, a mirror
/// sphere and two glass spheres, lit by two soft area lights.
///
/// Every wall uses `wall`, usually [`wall_material`] with a texture bound.
pub fn open_room(wall: Material) -> (Scene, Camera) {
    let half = ROOM_SIZE / 2.0;

    let painted = Material::new(Color::BLACK, Color::new(0.2, 0.7, 0.5), Color::splat(0.5))
        .with_absorption(0.5)
        .with_phong(10.0);
    let mirror = Material::new(Color::BLACK, Color::BLACK, Color::BLACK)
        .with_absorption(0.01)
        .with_phong(2.0);
    let clear_glass = Material::new(Color::BLACK, Color::BLACK, Color::splat(0.5))
        .with_phong(10.0)
        .with_refraction(1.0, 0.5);
    let dense_glass = Material::new(Color::BLACK, Color::BLACK, Color::splat(0.5))
        .with_absorption(10000.0)
        .with_phong(10.0)
        .with_refraction(1.0, 0.6);

    let mut scene = Scene::new();

    // Walls, all facing inwards
    let walls = [
        (Mat4::from_translation(Vec3::new(-half, 0.0, 0.0)) * Mat4::from_rotation_y(FRAC_PI_2), false),
        (Mat4::from_translation(Vec3::new(0.0, 0.0, half)), true),
        (Mat4::from_translation(Vec3::new(0.0, 0.0, -half)), false),
        (Mat4::from_translation(Vec3::new(0.0, half, 0.0)) * Mat4::from_rotation_x(FRAC_PI_2), false),
        (Mat4::from_translation(Vec3::new(0.0, -half, 0.0)) * Mat4::from_rotation_x(-FRAC_PI_2), false),
    ];
    for (transform, inverse_normal) in walls {
        scene.add_object(Plane::new(transform, ROOM_SIZE, ROOM_SIZE, wall.clone(), inverse_normal));
    }

    scene.add_object(Cuboid::cube(
        Vec3::new(0.0, -2.0, -half + 1.5),
        Vec3::new(0.0, 0.0, -0.5),
        3.0,
        painted,
    ));

    scene.add_object(Sphere::new(Vec3::new(1.5, 1.5, -half + 2.0), 2.0, mirror));
    scene.add_object(Sphere::new(Vec3::new(1.5, 2.0, 2.0), 2.0, dense_glass));
    scene.add_object(Sphere::new(Vec3::new(0.0, -2.0, -half + 4.5), 1.5, clear_glass));

    let dim = Color::splat(0.03);
    scene.add_lights(Light::grid(Vec3::new(2.0, -4.0, 2.0), 5, 0.2, dim));
    scene.add_lights(Light::grid(Vec3::new(4.0, 4.0, 3.0), 5, 0.2, dim));

    log::info!("Built open room: {} objects, {} lights", scene.objects.len(), scene.lights.len());

    let camera = Camera::new()
        .with_position(Vec3::new(17.0, 0.0, 0.0), Vec3::ZERO, Vec3::Z)
        .with_lens(6.0, 5.0);

    (scene, camera)
}
