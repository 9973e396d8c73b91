//! Box primitive assembled from six quads.

use std::f32::consts::FRAC_PI_2;
use std::f32::consts::PI;

use crate::hittable::{Hittable, Intersection};
use crate::plane::Plane;
use lux_core::Material;
use lux_math::{Mat4, Mat4Ext, Ray, Vec3};

/// The six faces of a box, named by their outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    PosZ,
    NegZ,
    NegX,
    PosX,
    PosY,
    NegY,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::PosZ, Face::NegZ, Face::NegX, Face::PosX, Face::PosY, Face::NegY];

    /// Face placement in the box's local frame plus the quad's (width, height).
    ///
    /// Each rotation turns the quad's local +Z into the outward normal.
    fn placement(self, size: Vec3) -> (Mat4, f32, f32) {
        let half = size / 2.0;
        match self {
            Face::PosZ => (Mat4::from_translation(Vec3::new(0.0, 0.0, half.z)), size.x, size.y),
            Face::NegZ => (
                Mat4::from_translation(Vec3::new(0.0, 0.0, -half.z)) * Mat4::from_rotation_x(PI),
                size.x,
                size.y,
            ),
            Face::NegX => (
                Mat4::from_translation(Vec3::new(-half.x, 0.0, 0.0)) * Mat4::from_rotation_y(-FRAC_PI_2),
                size.z,
                size.y,
            ),
            Face::PosX => (
                Mat4::from_translation(Vec3::new(half.x, 0.0, 0.0)) * Mat4::from_rotation_y(FRAC_PI_2),
                size.z,
                size.y,
            ),
            Face::PosY => (
                Mat4::from_translation(Vec3::new(0.0, half.y, 0.0)) * Mat4::from_rotation_x(-FRAC_PI_2),
                size.x,
                size.z,
            ),
            Face::NegY => (
                Mat4::from_translation(Vec3::new(0.0, -half.y, 0.0)) * Mat4::from_rotation_x(FRAC_PI_2),
                size.x,
                size.z,
            ),
        }
    }

    /// World-space quad for this face of a box with the given pose.
    pub fn plane(self, pose: Mat4, size: Vec3, material: &Material) -> Plane {
        let (local, width, height) = self.placement(size);
        Plane::new(pose * local, width, height, material.clone(), false)
    }
}

/// An oriented box made of six outward-facing quads.
#[derive(Debug, Clone)]
pub struct Cuboid {
    faces: [Plane; 6],
}

impl Cuboid {
    /// Create a box centered at `position`, rotated by `rotation` (radians
    /// about X, then Y, then Z) with edge lengths `size`.
    pub fn new(position: Vec3, rotation: Vec3, size: Vec3, material: Material) -> Self {
        let pose = Mat4::from_pose(position, rotation);
        let faces = Face::ALL.map(|face| face.plane(pose, size, &material));

        Self { faces }
    }

    /// Create a cube with equal edges.
    pub fn cube(position: Vec3, rotation: Vec3, edge: f32, material: Material) -> Self {
        Self::new(position, rotation, Vec3::splat(edge), material)
    }

    /// The six faces, in [`Face::ALL`] order.
    pub fn faces(&self) -> &[Plane; 6] {
        &self.faces
    }
}

impl Hittable for Cuboid {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        self.faces
            .iter()
            .filter_map(|face| face.intersect(ray))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
