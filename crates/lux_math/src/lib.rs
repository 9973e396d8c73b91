// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;

/// Tolerance shared by every intersection and shading test.
pub const EPSILON: f32 = 0.001;

/// Reflect a vector about a normal: `v - 2 (v . n) n`.
///
/// `n` is expected to be unit length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
