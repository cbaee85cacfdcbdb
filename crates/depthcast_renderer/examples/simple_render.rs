//! Simple depth render example.
//!
//! Renders a few spheres over a triangle floor and saves to PPM format.

use depthcast_renderer::{
    render_parallel, save_image, Camera, CameraConfig, CancelToken, HitPolicy, RenderConfig,
    Scene, ShadingRange, Sphere, Triangle, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Depthcast - Simple Example");
    println!("==========================");

    // Build the scene
    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    // Set up camera
    let camera = Camera::new(&CameraConfig {
        position: [0.0, 3.0, -25.0],
        direction: [0.0, -0.1, 1.0],
        image_width: 400,
        viewport_width: 40.0,
        aspect_ratio: 16.0 / 9.0,
        focal_length: 12.0,
    })?;

    // Spheres overlap along the view axis, so pick the nearest hit
    let config = RenderConfig {
        shading: ShadingRange::new(15.0, 45.0)?,
        hit_policy: HitPolicy::Nearest,
        ..RenderConfig::default()
    };

    let (width, height) = (camera.image_width, camera.image_height);
    println!("Rendering {width}x{height}...");

    let start = std::time::Instant::now();
    let image = render_parallel(&camera, &scene, &config, &CancelToken::new())?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_image(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Result<Scene, depthcast_renderer::ConfigError> {
    let mut scene = Scene::new();

    // Floor made of two triangles
    let corners = [
        Vec3::new(-30.0, -4.0, -10.0),
        Vec3::new(30.0, -4.0, -10.0),
        Vec3::new(30.0, -4.0, 40.0),
        Vec3::new(-30.0, -4.0, 40.0),
    ];
    let [a, b, c, d] = corners;
    scene.add(Triangle::new("floor a", a, b, c)?);
    scene.add(Triangle::new("floor b", a, c, d)?);

    // A row of spheres receding into the distance
    for i in 0..5 {
        let center = Vec3::new(-8.0 + i as f32 * 4.0, 0.0, i as f32 * 6.0);
        scene.add(Sphere::new(format!("sphere {i}"), center, 3.0)?);
    }

    println!("Created {} objects", scene.len());
    Ok(scene)
}
