//! Sphere primitive for ray casting.

use crate::{ConfigError, Ray};
use depthcast_math::Vec3;

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    id: String,
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails when the radius is not a positive finite number or the center
    /// has non-finite coordinates.
    pub fn new(id: impl Into<String>, center: Vec3, radius: f32) -> Result<Self, ConfigError> {
        let id = id.into();
        if !center.is_finite() {
            return Err(ConfigError::InvalidGeometry {
                id,
                reason: format!("center {center} is not finite"),
            });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidGeometry {
                id,
                reason: format!("radius {radius} must be positive"),
            });
        }

        Ok(Self { id, center, radius })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distance from the ray origin to the nearer of the two surface points
    /// on the ray's line, or `None` when the line misses the sphere.
    ///
    /// Distances are measured to the points, not along the signed ray
    /// parameter, so a sphere behind the origin or around it still reports
    /// a hit.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let oc = self.center - ray.origin();
        // Projection of the center onto the ray line
        let proj = oc.dot(ray.direction());
        // Squared distance from the center to the ray line
        let d2 = oc.length_squared() - proj * proj;
        let r2 = self.radius * self.radius;

        if d2 > r2 {
            return None;
        }

        let half_chord = (r2 - d2).max(0.0).sqrt();
        let near_point = ray.at(proj - half_chord);
        let far_point = ray.at(proj + half_chord);

        let near_dist = (near_point - ray.origin()).length();
        let far_dist = (far_point - ray.origin()).length();
        Some(near_dist.min(far_dist))
    }
}
