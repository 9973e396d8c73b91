// Transform utilities for Mat4
//
// Extends glam::Mat4 with the pose helpers the scene builder needs.
// Note: glam::Mat4 already provides transform_point3(), determinant() and inverse().
// glam multiplies column vectors, so in `a * b` the matrix `b` is applied first.

use glam::{Mat4, Vec3};

/// Determinants smaller than this are treated as singular.
const SINGULAR_DETERMINANT: f32 = 1e-8;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext: Sized {
    /// Rotate about X, then Y, then Z (radians), then translate to `position`.
    fn from_pose(position: Vec3, rotation: Vec3) -> Self;

    /// Inverse of an affine transform, or `None` when its linear part is singular.
    fn try_inverse(&self) -> Option<Self>;
}

impl Mat4Ext for Mat4 {
    fn from_pose(position: Vec3, rotation: Vec3) -> Self {
        Mat4::from_translation(position)
            * Mat4::from_rotation_z(rotation.z)
            * Mat4::from_rotation_y(rotation.y)
            * Mat4::from_rotation_x(rotation.x)
    }

    fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_DETERMINANT {
            return None;
        }
        Some(self.inverse())
    }
}
