/// A closed interval `[min, max]` on the real line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interval centered on zero spanning `extent` in total.
    pub fn centered(extent: f32) -> Self {
        Self::new(-extent / 2.0, extent / 2.0)
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Widens the interval by `tolerance` on each side.
    pub fn pad(&self, tolerance: f32) -> Interval {
        Interval::new(self.min - tolerance, self.max + tolerance)
    }

    /// Position of x relative to the interval, 0 at `min` and 1 at `max`,
    /// clamped to [0, 1].
    pub fn normalized(&self, x: f32) -> f32 {
        ((x - self.min) / self.size()).clamp(0.0, 1.0)
    }

    /// The unit interval [0, 1].
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
