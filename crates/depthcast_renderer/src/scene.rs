//! Ordered collection of primitives queried once per camera ray.

use crate::{ConfigError, Hit, HitPolicy, Primitive, Ray};
use depthcast_core::PrimitiveDesc;

/// An ordered list of primitives.
///
/// Insertion order matters: under [`HitPolicy::FirstInList`] the earliest
/// primitive that reports a hit wins, even if a later one is closer.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
        }
    }

    /// Build a scene from document descriptors, validating each one.
    ///
    /// Fails on the first invalid primitive; no partial scene is returned.
    pub fn from_descriptors(descs: &[PrimitiveDesc]) -> Result<Self, ConfigError> {
        let primitives = descs
            .iter()
            .map(Primitive::from_desc)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Built scene with {} primitives", primitives.len());
        Ok(Self { primitives })
    }

    /// Add a primitive to the end of the list.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in insertion order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Find the hit that decides a ray's pixel under the given policy.
    pub fn intersect(&self, ray: &Ray, policy: HitPolicy) -> Option<Hit<'_>> {
        let mut hits = self.primitives.iter().filter_map(|primitive| {
            let distance = primitive.intersect(ray)?;
            Some(Hit {
                distance,
                primitive,
            })
        });

        match policy {
            HitPolicy::FirstInList => hits.next(),
            // Strict comparison keeps the earlier primitive on ties
            HitPolicy::Nearest => hits.reduce(|best, hit| {
                if hit.distance < best.distance {
                    hit
                } else {
                    best
                }
            }),
        }
    }
}

impl FromIterator<Primitive> for Scene {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Self {
            primitives: iter.into_iter().collect(),
        }
    }
}
