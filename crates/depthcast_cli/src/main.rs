use std::io::{self, BufWriter};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use depthcast_core::{load_scene, SceneDocument};
use depthcast_renderer::{
    render, render_parallel, save_image, write_ppm, write_ppm_rows, Camera, CancelToken,
    RenderConfig, Scene,
};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let mut doc = match &args.scene {
        Some(path) => {
            load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))?
        }
        None => {
            log::info!("No scene given, rendering the demo scene");
            SceneDocument::demo()
        }
    };
    args.apply_overrides(&mut doc);

    let start = Instant::now();
    let camera = Camera::new(&doc.camera).context("Invalid camera")?;
    let scene = Scene::from_descriptors(&doc.primitives).context("Invalid scene")?;
    let config = RenderConfig::from_settings(&doc.render).context("Invalid render settings")?;
    log::info!(
        "Scene built in {:?}: {} primitives, {}x{}, {:?}",
        start.elapsed(),
        scene.len(),
        camera.image_width,
        camera.image_height,
        config.hit_policy
    );

    if args.writes_to_stdout() {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        let written = if args.parallel {
            let image = render_parallel(&camera, &scene, &config, &CancelToken::new())?;
            write_ppm(&image, &mut writer)
        } else {
            // Stream rows as they are rendered
            write_ppm_rows(
                &mut writer,
                camera.image_width,
                camera.image_height,
                camera.render(&scene, &config),
            )
        };
        written.context("Failed to write image to stdout")?;
        return Ok(());
    }

    let image = if args.parallel {
        render_parallel(&camera, &scene, &config, &CancelToken::new())?
    } else {
        render(&camera, &scene, &config)
    };

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to save image to {}", args.output))?;

    Ok(())
}
