//! Depthcast renderer - CPU depth-shaded ray casting
//!
//! Casts one ray per pixel from a pinhole camera into a list of spheres and
//! triangles and shades each hit by its distance: close is white, far is
//! black, a miss is background.

mod camera;
mod error;
mod output;
mod primitive;
mod renderer;
mod scene;
mod shading;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use error::{ConfigError, OutputError, RenderError};
pub use output::{save_image, write_ppm, write_ppm_header, write_ppm_row, write_ppm_rows};
pub use primitive::{Hit, Primitive};
pub use renderer::{
    render, render_parallel, render_pixel, CancelToken, ImageBuffer, Pixel, RenderConfig, Rows,
    BACKGROUND,
};
pub use scene::Scene;
pub use shading::{grayscale, ShadingRange};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export common math and document types
pub use depthcast_core::{CameraConfig, HitPolicy, RenderSettings};
pub use depthcast_math::{Interval, Ray, Vec3};
