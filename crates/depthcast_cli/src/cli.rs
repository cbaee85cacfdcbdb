use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use depthcast_core::{HitPolicy, SceneDocument};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HitPolicyArg {
    /// First primitive in scene order that is hit
    First,
    /// Closest hit across all primitives
    Nearest,
}

impl From<HitPolicyArg> for HitPolicy {
    fn from(arg: HitPolicyArg) -> Self {
        match arg {
            HitPolicyArg::First => HitPolicy::FirstInList,
            HitPolicyArg::Nearest => HitPolicy::Nearest,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "depthcast")]
#[command(about = "Render a depth-shaded image of spheres and triangles")]
pub struct Args {
    /// Scene document (JSON). Renders the built-in demo scene when omitted
    pub scene: Option<PathBuf>,

    /// Output file (.ppm is written as text PPM, other extensions via `image`); `-` for stdout
    #[arg(short, long, default_value = "output.ppm")]
    pub output: String,

    /// Override the image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the distance shaded white
    #[arg(long)]
    pub near: Option<f32>,

    /// Override the distance shaded black
    #[arg(long)]
    pub far: Option<f32>,

    /// Override which hit decides a pixel
    #[arg(long, value_enum)]
    pub hit_policy: Option<HitPolicyArg>,

    /// Render rows in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of a scene document.
    pub fn apply_overrides(&self, doc: &mut SceneDocument) {
        if let Some(width) = self.width {
            doc.camera.image_width = width;
        }
        if let Some(near) = self.near {
            doc.render.near = near;
        }
        if let Some(far) = self.far {
            doc.render.far = far;
        }
        if let Some(policy) = self.hit_policy {
            doc.render.hit_policy = policy.into();
        }
    }

    /// True when the image goes to stdout.
    pub fn writes_to_stdout(&self) -> bool {
        self.output == "-"
    }
}
