//! Camera for ray generation.

use crate::{ConfigError, Ray, RenderConfig, Rows, Scene};
use depthcast_core::CameraConfig;
use depthcast_math::Vec3;

/// World up axis used to build the view basis.
const WORLD_UP: Vec3 = Vec3::Y;

/// Pinhole camera projecting the image grid onto a view plane
/// `focal_length` units in front of it.
///
/// All derived values are computed once in [`Camera::new`]; a camera is
/// immutable afterwards and can be shared across render threads.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    right: Vec3,
    focal_length: f32,

    // View plane
    viewport_width: f32,
    viewport_height: f32,
    pixel_width: f32,
    pixel_height: f32,
    plane_center: Vec3,
}

impl Camera {
    /// Validate a camera config and derive the view basis.
    pub fn new(config: &CameraConfig) -> Result<Self, ConfigError> {
        let position = config.position();
        if !position.is_finite() {
            return Err(invalid(format!("position {position} is not finite")));
        }

        let direction = config
            .direction()
            .try_normalize()
            .ok_or_else(|| invalid("direction must be a non-zero finite vector"))?;

        if config.image_width == 0 {
            return Err(invalid("image_width must be positive"));
        }
        check_positive("viewport_width", config.viewport_width)?;
        check_positive("aspect_ratio", config.aspect_ratio)?;
        check_positive("focal_length", config.focal_length)?;

        // Truncates, matching integer image sizes
        let image_height = (config.image_width as f32 / config.aspect_ratio) as u32;
        if image_height == 0 {
            return Err(invalid(format!(
                "aspect_ratio {} leaves no rows for image_width {}",
                config.aspect_ratio, config.image_width
            )));
        }

        let right = direction
            .cross(WORLD_UP)
            .try_normalize()
            .ok_or_else(|| invalid("direction must not be parallel to the world up axis"))?;

        let viewport_width = config.viewport_width;
        let viewport_height = viewport_width * image_height as f32 / config.image_width as f32;

        let camera = Self {
            image_width: config.image_width,
            image_height,
            position,
            direction,
            up: WORLD_UP,
            right,
            focal_length: config.focal_length,
            viewport_width,
            viewport_height,
            pixel_width: viewport_width / config.image_width as f32,
            pixel_height: viewport_height / image_height as f32,
            plane_center: position + config.focal_length * direction,
        };

        log::debug!(
            "Camera {}x{} at {} looking {}, view plane {}x{} (pixel {}x{})",
            camera.image_width,
            camera.image_height,
            camera.position,
            camera.direction,
            camera.viewport_width,
            camera.viewport_height,
            camera.pixel_width,
            camera.pixel_height
        );

        Ok(camera)
    }

    /// Generate the ray through the center of pixel (x, y).
    ///
    /// Increasing `x` walks along `-right`; increasing `y` walks down the
    /// view plane, so row 0 is the top of the image.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let u = (x as f32 + 0.5) / self.image_width as f32;
        let v = (y as f32 + 0.5) / self.image_height as f32;

        let pixel = self.plane_center
            - (u - 0.5) * self.viewport_width * self.right
            - (v - 0.5) * self.viewport_height * self.up;

        // `right` is orthogonal to both `direction` and `up`, and `new` rejects
        // a direction parallel to world up, so `pixel` never equals `position`
        Ray::new(self.position, pixel - self.position)
    }

    /// Lazily render `scene`, one row per item, top to bottom.
    pub fn render<'a>(&'a self, scene: &'a Scene, config: &'a RenderConfig) -> Rows<'a> {
        Rows::new(self, scene, config)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit viewing direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit vector along `direction × up`.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// View plane size in world units (width, height).
    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Size of one pixel on the view plane (width, height).
    pub fn pixel_size(&self) -> (f32, f32) {
        (self.pixel_width, self.pixel_height)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidCameraConfig(message.into())
}

fn check_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}
