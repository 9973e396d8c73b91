use crate::Vec3;

/// A ray in 3D space with an origin and a unit direction.
///
/// Every intersection routine measures hit distances along `direction`,
/// so it must be unit length. [`Ray::between`] normalizes for you; callers
/// of [`Ray::new`] are responsible for passing a normalized direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from an origin and an already normalized direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray starting at `from` and pointing towards `to`.
    ///
    /// The two points must differ, otherwise the direction is NaN.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self {
            origin: from,
            direction: (to - from).normalize(),
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
