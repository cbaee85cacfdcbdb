//! Closed set of scene primitives and the hit they report.

use crate::{ConfigError, Ray, Sphere, Triangle};
use depthcast_core::PrimitiveDesc;
use depthcast_math::Vec3;

/// A primitive that can be hit by rays.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Primitive {
    /// Build a validated primitive from its scene-document description.
    pub fn from_desc(desc: &PrimitiveDesc) -> Result<Self, ConfigError> {
        match desc {
            PrimitiveDesc::Sphere { id, center, radius } => {
                Sphere::new(id.clone(), Vec3::from(*center), *radius).map(Primitive::Sphere)
            }
            PrimitiveDesc::Triangle { id, vertices } => {
                let [v0, v1, v2] = *vertices;
                Triangle::new(id.clone(), v0.into(), v1.into(), v2.into()).map(Primitive::Triangle)
            }
        }
    }

    /// Distance along the ray to this primitive, or `None` on a miss.
    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray),
            Primitive::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Primitive::Sphere(sphere) => sphere.id(),
            Primitive::Triangle(triangle) => triangle.id(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// The primitive that was hit
    pub primitive: &'a Primitive,
}
