/// A closed real interval `[min, max]`.
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

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if the interval is non-empty and both bounds are finite.
    pub fn is_finite_nonempty(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    /// Clamps x to be within the interval [min, max].
    ///
    /// NaN clamps to `max`, so an undefined value never reads as "inside".
    /// Never panics: with `min > max` the result is `max`, and a NaN bound
    /// is ignored.
    pub fn clamp(&self, x: f32) -> f32 {
        if x.is_nan() {
            return self.max;
        }
        x.max(self.min).min(self.max)
    }

    /// Position of x within the interval as a fraction in [0, 1].
    ///
    /// Values outside the interval are clamped first.
    pub fn normalize(&self, x: f32) -> f32 {
        (self.clamp(x) - self.min) / self.size()
    }
}
