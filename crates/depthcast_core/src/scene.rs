//! Scene document types.
//!
//! These are plain, serde-friendly descriptions of a scene. They carry no
//! derived data; the renderer turns them into validated geometry and a camera.

use depthcast_math::Vec3;
use serde::{Deserialize, Serialize};

/// Camera settings as written in a scene document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: [f32; 3],

    /// Viewing direction (need not be normalized)
    pub direction: [f32; 3],

    /// Output width in pixels; height is derived from the aspect ratio
    pub image_width: u32,

    /// Width of the view plane in world units
    pub viewport_width: f32,

    /// Image width divided by image height
    pub aspect_ratio: f32,

    /// Distance between the camera position and the view plane
    pub focal_length: f32,
}

impl CameraConfig {
    /// Camera position as a vector.
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Viewing direction as a vector (not normalized).
    pub fn direction(&self) -> Vec3 {
        Vec3::from(self.direction)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -20.0],
            direction: [0.0, 0.0, 1.0], // looking straight down +Z
            image_width: 200,
            viewport_width: 40.0,
            aspect_ratio: 16.0 / 9.0,
            focal_length: 10.0,
        }
    }
}

/// Which hit decides a pixel when several primitives are crossed by a ray.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// The first primitive in scene order that reports a hit.
    #[default]
    FirstInList,
    /// The hit with the smallest distance across all primitives.
    Nearest,
}

/// Shading and hit-selection settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Distance shaded at full brightness (255)
    pub near: f32,

    /// Distance shaded black (0)
    pub far: f32,

    pub hit_policy: HitPolicy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        // 0..255 reproduces a plain `255 - distance` falloff
        Self {
            near: 0.0,
            far: 255.0,
            hit_policy: HitPolicy::FirstInList,
        }
    }
}

/// One primitive as written in a scene document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimitiveDesc {
    Sphere {
        id: String,
        center: [f32; 3],
        radius: f32,
    },
    Triangle {
        id: String,
        vertices: [[f32; 3]; 3],
    },
}

impl PrimitiveDesc {
    /// Identifier of the described primitive.
    pub fn id(&self) -> &str {
        match self {
            PrimitiveDesc::Sphere { id, .. } | PrimitiveDesc::Triangle { id, .. } => id,
        }
    }

    /// Human-readable kind name, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PrimitiveDesc::Sphere { .. } => "sphere",
            PrimitiveDesc::Triangle { .. } => "triangle",
        }
    }

    /// Convenience constructor for a sphere descriptor.
    pub fn sphere(id: impl Into<String>, center: Vec3, radius: f32) -> Self {
        PrimitiveDesc::Sphere {
            id: id.into(),
            center: center.to_array(),
            radius,
        }
    }

    /// Convenience constructor for a triangle descriptor.
    pub fn triangle(id: impl Into<String>, v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        PrimitiveDesc::Triangle {
            id: id.into(),
            vertices: [v0.to_array(), v1.to_array(), v2.to_array()],
        }
    }
}

/// A complete scene document: camera, render settings and primitives.
///
/// Primitive order is significant: with [`HitPolicy::FirstInList`] it decides
/// which primitive wins when a ray crosses several.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub render: RenderSettings,

    #[serde(default)]
    pub primitives: Vec<PrimitiveDesc>,
}

impl SceneDocument {
    /// The built-in demo scene: a single sphere of radius 7 at the origin,
    /// seen from 20 units down the -Z axis.
    pub fn demo() -> Self {
        Self {
            camera: CameraConfig::default(),
            render: RenderSettings::default(),
            primitives: vec![PrimitiveDesc::sphere("sphere 1", Vec3::ZERO, 7.0)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_desc_accessors() {
        let sphere = PrimitiveDesc::sphere("ball", Vec3::new(1.0, 2.0, 3.0), 0.5);
        assert_eq!(sphere.id(), "ball");
        assert_eq!(sphere.kind(), "sphere");

        let tri = PrimitiveDesc::triangle("tri", Vec3::X, Vec3::Y, Vec3::Z);
        assert_eq!(tri.id(), "tri");
        assert_eq!(tri.kind(), "triangle");
        match tri {
            PrimitiveDesc::Triangle { vertices, .. } => {
                assert_eq!(vertices[2], [0.0, 0.0, 1.0]);
            }
            _ => panic!("expected a triangle"),
        }
    }

    #[test]
    fn test_demo_scene() {
        let doc = SceneDocument::demo();
        assert_eq!(doc.primitives.len(), 1);
        assert_eq!(doc.camera.position(), Vec3::new(0.0, 0.0, -20.0));
        assert_eq!(doc.camera.direction(), Vec3::Z);
        assert_eq!(doc.render.hit_policy, HitPolicy::FirstInList);
    }
}
