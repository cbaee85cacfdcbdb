//! Triangle primitive for ray casting.
//!
//! Intersects the ray with the triangle's plane, then checks the hit point
//! against each edge with a same-side test.

use crate::{ConfigError, Ray};
use depthcast_math::Vec3;

/// Below this |dot(normal, direction)| the ray is treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Relative area below which three vertices count as collinear.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    id: String,
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Plane normal, cross(v1 - v0, v2 - v0) (not normalized)
    normal: Vec3,
    /// Plane offset so that dot(normal, p) + offset = 0 on the plane
    offset: f32,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// Fails with [`ConfigError::DegenerateGeometry`] when the vertices are
    /// collinear (or coincide), since such a triangle has no plane.
    pub fn new(id: impl Into<String>, v0: Vec3, v1: Vec3, v2: Vec3) -> Result<Self, ConfigError> {
        let id = id.into();
        if !(v0.is_finite() && v1.is_finite() && v2.is_finite()) {
            return Err(ConfigError::InvalidGeometry {
                id,
                reason: "vertices must be finite".to_string(),
            });
        }

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let normal = edge1.cross(edge2);

        if normal.length() <= DEGENERATE_EPSILON * edge1.length() * edge2.length() {
            return Err(ConfigError::DegenerateGeometry { id });
        }

        let offset = -normal.dot(v0);

        Ok(Self {
            id,
            v0,
            v1,
            v2,
            normal,
            offset,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Plane as (normal, offset).
    pub fn plane(&self) -> (Vec3, f32) {
        (self.normal, self.offset)
    }

    /// Distance from the ray origin to the hit point, or `None` on a miss.
    ///
    /// Rays parallel to the plane and hits behind the origin are misses.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let ld = -(self.offset + self.normal.dot(ray.origin())) / denom;
        if !ld.is_finite() || ld < 0.0 {
            return None;
        }

        let p = ray.at(ld);
        if !self.contains(p) {
            return None;
        }

        Some((p - ray.origin()).length())
    }

    /// Same-side test for a point already on the triangle's plane.
    fn contains(&self, p: Vec3) -> bool {
        // (edge start, edge end, opposite vertex)
        let edges = [
            (self.v2, self.v1, self.v0),
            (self.v0, self.v1, self.v2),
            (self.v0, self.v2, self.v1),
        ];

        edges.iter().all(|&(a, b, opposite)| {
            let edge = b - a;
            let to_point = edge.cross(p - a);
            let to_opposite = edge.cross(opposite - a);
            to_point.dot(to_opposite) >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_triangle() -> Triangle {
        Triangle::new(
            "tri",
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn test_plane_is_cached() {
        let (normal, offset) = test_triangle().plane();
        assert_eq!(normal, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let dist = test_triangle()
            .intersect(&ray)
            .expect("center ray should hit");
        assert!((dist - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_triangle_edge_rejection() {
        let origin = Vec3::new(0.0, 0.0, -10.0);
        let tri = test_triangle();

        let ray = Ray::new(origin, Vec3::new(5.0, 5.0, 1.0));
        assert_eq!(tri.intersect(&ray), None);

        let towards_point = Ray::towards(origin, Vec3::new(5.0, 5.0, 1.0)).unwrap();
        assert_eq!(tri.intersect(&towards_point), None);
    }

    #[test]
    fn test_triangle_rejects_points_outside_each_edge() {
        let tri = test_triangle();

        // Just past v0-v2 (x = 1), v0-v1 (above) and v1-v2 (below)
        let outside = [
            Vec3::new(2.0, 0.0, -10.0),
            Vec3::new(0.0, 0.6, -10.0),
            Vec3::new(0.0, -0.6, -10.0),
        ];
        for origin in outside {
            let ray = Ray::new(origin, Vec3::Z);
            assert_eq!(tri.intersect(&ray), None, "origin {origin:?}");
        }
    }

    #[test]
    fn test_triangle_hit_on_edge() {
        // Lands on the v0-v2 edge at (1, 0, 0)
        let ray = Ray::new(Vec3::new(1.0, 0.0, -10.0), Vec3::Z);
        let dist = test_triangle().intersect(&ray).unwrap();
        assert!((dist - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_triangle_plane_off_origin() {
        let tri = Triangle::new(
            "shifted",
            Vec3::new(1.0, 1.0, 5.0),
            Vec3::new(-1.0, 0.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
        )
        .unwrap();

        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let dist = tri.intersect(&ray).unwrap();
        assert!((dist - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_triangle_behind_origin() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert_eq!(test_triangle().intersect(&ray), None);
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        // In the plane and above it
        let in_plane = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        let above = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Y);

        assert_eq!(test_triangle().intersect(&in_plane), None);
        assert_eq!(test_triangle().intersect(&above), None);
    }

    #[test]
    fn test_triangle_hit_on_vertex() {
        // Aim straight at v0 = (1, 1, 0)
        let ray = Ray::new(Vec3::new(1.0, 1.0, -3.0), Vec3::Z);
        let dist = test_triangle().intersect(&ray).unwrap();
        assert!((dist - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let collinear = Triangle::new(
            "line",
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(
            collinear.unwrap_err(),
            ConfigError::DegenerateGeometry {
                id: "line".to_string(),
            }
        );

        let coincident = Triangle::new("point", Vec3::ONE, Vec3::ONE, Vec3::ONE);
        assert!(matches!(coincident, Err(ConfigError::DegenerateGeometry { .. })));
    }
}
