//! Error types for scene, camera and render setup.

use thiserror::Error;

/// Validation failures raised while building a scene, camera or render config.
///
/// These are reported up front; once construction succeeds, per-pixel queries
/// cannot fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Degenerate triangle '{id}': vertices are collinear")]
    DegenerateGeometry { id: String },

    #[error("Invalid geometry '{id}': {reason}")]
    InvalidGeometry { id: String, reason: String },

    #[error("Invalid shading range: near ({near}) must be finite and less than far ({far})")]
    InvalidShadingRange { near: f32, far: f32 },

    #[error("Invalid camera config: {0}")]
    InvalidCameraConfig(String),
}

/// Failures of a render pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Render cancelled")]
    Cancelled,
}

/// Failures while writing an image to disk.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
