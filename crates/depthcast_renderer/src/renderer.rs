//! Render loop.
//!
//! Implements depth-shaded ray casting with:
//! - A lazy row iterator for streaming output
//! - A sequential whole-image render
//! - A row-parallel render on the rayon pool with cooperative cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::{Camera, ConfigError, HitPolicy, RenderError, Scene, ShadingRange};
use depthcast_core::RenderSettings;

/// An 8-bit RGB triple.
pub type Pixel = [u8; 3];

/// Pixel value for rays that hit nothing.
pub const BACKGROUND: Pixel = [0, 0, 0];

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Distance range mapped onto gray levels
    pub shading: ShadingRange,
    /// Which hit decides a pixel when several primitives are crossed
    pub hit_policy: HitPolicy,
    /// Color for pixels whose ray hits nothing
    pub background: Pixel,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shading: ShadingRange::default(),
            hit_policy: HitPolicy::FirstInList,
            background: BACKGROUND,
        }
    }
}

impl RenderConfig {
    /// Validate document render settings.
    pub fn from_settings(settings: &RenderSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            shading: ShadingRange::new(settings.near, settings.far)?,
            hit_policy: settings.hit_policy,
            background: BACKGROUND,
        })
    }
}

/// Compute the value of pixel (x, y).
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    x: u32,
    y: u32,
) -> Pixel {
    let ray = camera.ray_for_pixel(x, y);
    match scene.intersect(&ray, config.hit_policy) {
        Some(hit) => {
            let gray = config.shading.shade(hit.distance);
            [gray, gray, gray]
        }
        None => config.background,
    }
}

fn render_row_into(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    y: u32,
    row: &mut [Pixel],
) {
    for (x, pixel) in (0u32..).zip(row.iter_mut()) {
        *pixel = render_pixel(camera, scene, config, x, y);
    }
}

/// Lazy, row-major stream of rendered rows, top to bottom.
///
/// Yields exactly `image_height` rows of `image_width` pixels. The stream is
/// consumed once; call [`Camera::render`] again to start over.
pub struct Rows<'a> {
    camera: &'a Camera,
    scene: &'a Scene,
    config: &'a RenderConfig,
    next_row: u32,
}

impl<'a> Rows<'a> {
    pub(crate) fn new(camera: &'a Camera, scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self {
            camera,
            scene,
            config,
            next_row: 0,
        }
    }
}

impl Iterator for Rows<'_> {
    type Item = Vec<Pixel>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.camera.image_height {
            return None;
        }

        let mut row = vec![self.config.background; self.camera.image_width as usize];
        render_row_into(
            self.camera,
            self.scene,
            self.config,
            self.next_row,
            &mut row,
        );
        self.next_row += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.camera.image_height - self.next_row) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y). Coordinates must be inside the image.
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    /// Rows of pixels, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Pixel]> + '_ {
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Flatten to RGB bytes (for encoding).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        let (width, height) = (self.width, self.height);
        debug_assert!(
            x < width && y < height,
            "pixel ({x}, {y}) outside {width}x{height} image"
        );
        y as usize * width as usize + x as usize
    }
}

/// Render the entire scene on the calling thread.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for (y, row) in camera.render(scene, config).enumerate() {
        let offset = y * camera.image_width as usize;
        image.pixels[offset..offset + row.len()].copy_from_slice(&row);
    }

    log::info!(
        "Rendered {}x{} ({} primitives) in {:?}",
        image.width,
        image.height,
        scene.len(),
        start.elapsed()
    );
    image
}

/// Shared flag for stopping a render between rows.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Rows already in flight finish.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Render the scene with rows spread across the rayon thread pool.
///
/// Each worker writes its own row slice, so the result is identical to
/// [`render`]. The token is checked before every row; a cancelled render
/// returns [`RenderError::Cancelled`] instead of a partial image.
pub fn render_parallel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> Result<ImageBuffer, RenderError> {
    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let width = camera.image_width as usize;

    image
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, row)| {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }
            render_row_into(camera, scene, config, y as u32, row);
            Ok(())
        })
        .inspect_err(|_| log::warn!("Render cancelled after {:?}", start.elapsed()))?;

    log::info!(
        "Rendered {}x{} ({} primitives) on {} threads in {:?}",
        image.width,
        image.height,
        scene.len(),
        rayon::current_num_threads(),
        start.elapsed()
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sphere, Triangle};
    use depthcast_core::{CameraConfig, SceneDocument};
    use depthcast_math::Vec3;

    fn demo() -> (Camera, Scene, RenderConfig) {
        let doc = SceneDocument::demo();
        let camera = Camera::new(&doc.camera).unwrap();
        let scene = Scene::from_descriptors(&doc.primitives).unwrap();
        let config = RenderConfig::from_settings(&doc.render).unwrap();
        (camera, scene, config)
    }

    #[test]
    fn test_row_and_column_counts() {
        let (camera, scene, config) = demo();
        let rows = camera.render(&scene, &config);
        assert_eq!(rows.len(), 112);

        let rows: Vec<_> = rows.collect();
        assert_eq!(rows.len(), 112);
        assert!(rows.iter().all(|row| row.len() == 200));

        let odd = Camera::new(&CameraConfig {
            image_width: 7,
            aspect_ratio: 7.0 / 3.0,
            ..CameraConfig::default()
        })
        .unwrap();
        let rows: Vec<_> = odd.render(&scene, &config).collect();
        assert_eq!(rows.len(), odd.image_height as usize);
        assert!(rows.iter().all(|row| row.len() == 7));
    }

    #[test]
    fn test_demo_scene_shading() {
        let (camera, scene, config) = demo();
        let image = render(&camera, &scene, &config);

        // Corners miss the sphere
        assert_eq!(image.get(0, 0), BACKGROUND);
        assert_eq!(image.get(199, 111), BACKGROUND);

        // Center rays hit the sphere front about 13 units away
        let center = image.get(100, 56);
        assert_eq!(center[0], center[1]);
        assert_eq!(center[1], center[2]);
        assert!((241..=242).contains(&center[0]), "center = {center:?}");
    }

    #[test]
    fn test_render_is_deterministic() {
        let (camera, scene, config) = demo();

        let first: Vec<_> = camera.render(&scene, &config).collect();
        let second: Vec<_> = camera.render(&scene, &config).collect();
        assert_eq!(first, second);

        let image = render(&camera, &scene, &config);
        let flattened: Vec<Pixel> = first.into_iter().flatten().collect();
        assert_eq!(image.pixels, flattened);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut scene = Scene::new();
        scene.add(Sphere::new("ball", Vec3::new(3.0, 0.0, 0.0), 4.0).unwrap());
        scene.add(
            Triangle::new(
                "tri",
                Vec3::new(-10.0, -6.0, 2.0),
                Vec3::new(0.0, 8.0, 2.0),
                Vec3::new(10.0, -6.0, 2.0),
            )
            .unwrap(),
        );
        let camera = Camera::new(&CameraConfig {
            image_width: 64,
            ..CameraConfig::default()
        })
        .unwrap();

        for hit_policy in [HitPolicy::FirstInList, HitPolicy::Nearest] {
            let config = RenderConfig {
                shading: ShadingRange::new(5.0, 40.0).unwrap(),
                hit_policy,
                ..RenderConfig::default()
            };
            let sequential = render(&camera, &scene, &config);
            let cancel = CancelToken::new();
            let parallel = render_parallel(&camera, &scene, &config, &cancel).unwrap();
            assert_eq!(sequential, parallel);
        }
    }

    #[test]
    fn test_triangle_only_coverage() {
        let mut scene = Scene::new();
        scene.add(
            Triangle::new(
                "tri",
                Vec3::new(10.0, 10.0, 0.0),
                Vec3::new(-10.0, 0.0, 0.0),
                Vec3::new(10.0, -10.0, 0.0),
            )
            .unwrap(),
        );
        let camera = Camera::new(&CameraConfig::default()).unwrap();
        let image = render(&camera, &scene, &RenderConfig::default());

        // Center of the image lands inside the triangle
        assert_ne!(image.get(100, 56), BACKGROUND);
        // Corners and a pixel just past the x = 10 edge near y = 0 miss it
        assert_eq!(image.get(0, 0), BACKGROUND);
        assert_eq!(image.get(199, 0), BACKGROUND);
        assert_eq!(image.get(134, 56), BACKGROUND);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside 3x2 image")]
    fn test_image_buffer_rejects_out_of_range_column() {
        let image = ImageBuffer::new(3, 2);
        // Would otherwise alias pixel (0, 1)
        image.get(3, 0);
    }

    #[test]
    fn test_hit_policy_changes_pixels() {
        // Far sphere listed first, near sphere in front of it
        let mut scene = Scene::new();
        scene.add(Sphere::new("far", Vec3::new(0.0, 0.0, 10.0), 5.0).unwrap());
        scene.add(Sphere::new("near", Vec3::new(0.0, 0.0, -5.0), 2.0).unwrap());
        let camera = Camera::new(&CameraConfig::default()).unwrap();

        let first = RenderConfig {
            shading: ShadingRange::new(0.0, 40.0).unwrap(),
            ..RenderConfig::default()
        };
        let nearest = RenderConfig {
            hit_policy: HitPolicy::Nearest,
            ..first
        };

        let (cx, cy) = (camera.image_width / 2, camera.image_height / 2);
        let first_px = render_pixel(&camera, &scene, &first, cx, cy);
        let nearest_px = render_pixel(&camera, &scene, &nearest, cx, cy);

        // Nearest hit is closer, so brighter
        assert!(nearest_px[0] > first_px[0]);
    }

    #[test]
    fn test_empty_scene_is_background() {
        let camera = Camera::new(&CameraConfig {
            image_width: 16,
            ..CameraConfig::default()
        })
        .unwrap();
        let image = render(&camera, &Scene::new(), &RenderConfig::default());
        assert!(image.pixels.iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn test_cancelled_render() {
        let (camera, scene, config) = demo();
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = render_parallel(&camera, &scene, &config, &cancel);
        assert_eq!(result, Err(RenderError::Cancelled));
    }

    #[test]
    fn test_invalid_render_settings() {
        let settings = RenderSettings {
            near: 10.0,
            far: 10.0,
            ..RenderSettings::default()
        };
        assert_eq!(
            RenderConfig::from_settings(&settings),
            Err(ConfigError::InvalidShadingRange {
                near: 10.0,
                far: 10.0,
            })
        );
    }

    #[test]
    fn test_image_buffer_rows() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, [9, 8, 7]);

        let rows: Vec<_> = image.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[[0, 0, 0], [0, 0, 0], [9, 8, 7]]);
        assert_eq!(image.to_rgb_bytes().len(), 18);
        assert_eq!(&image.to_rgb_bytes()[15..], &[9, 8, 7]);
    }
}
