//! Distance falloff shading.
//!
//! The only shading model: hit distance maps linearly to a gray level,
//! bright when close and black when far.

use crate::ConfigError;
use depthcast_math::Interval;

/// Map a hit distance to an 8-bit gray level.
///
/// `distance` is clamped into `[near, far]`; `near` maps to 255 and `far`
/// to 0. A range with `near >= far` or a NaN bound shades every distance
/// as far; [`ShadingRange`] rejects such ranges up front.
pub fn grayscale(distance: f32, near: f32, far: f32) -> u8 {
    let t = Interval::new(near, far).normalize(distance);
    let value = (255.0 * (1.0 - t)).round();
    value.clamp(0.0, 255.0) as u8
}

/// A validated `[near, far]` shading range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingRange {
    range: Interval,
}

impl ShadingRange {
    /// Create a shading range. Fails unless both bounds are finite and
    /// `near < far`.
    pub fn new(near: f32, far: f32) -> Result<Self, ConfigError> {
        let range = Interval::new(near, far);
        if !range.is_finite_nonempty() {
            return Err(ConfigError::InvalidShadingRange { near, far });
        }
        Ok(Self { range })
    }

    pub fn near(&self) -> f32 {
        self.range.min
    }

    pub fn far(&self) -> f32 {
        self.range.max
    }

    /// Gray level for a hit at `distance`.
    #[inline]
    pub fn shade(&self, distance: f32) -> u8 {
        grayscale(distance, self.range.min, self.range.max)
    }
}

impl Default for ShadingRange {
    fn default() -> Self {
        Self {
            range: Interval::new(0.0, 255.0),
        }
    }
}
