//! Depthcast Core - scene documents for the depthcast renderer.
//!
//! This crate provides:
//!
//! - **Scene document types**: `SceneDocument`, `CameraConfig`,
//!   `RenderSettings`, `PrimitiveDesc`
//! - **Loading**: JSON scene documents from files or strings
//!
//! Geometry is not validated here; the renderer checks descriptors when it
//! builds its own scene from them.
//!
//! # Example
//!
//! ```ignore
//! use depthcast_core::load_scene;
//!
//! let doc = load_scene("scene.json")?;
//! println!("Loaded {} primitives", doc.primitives.len());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{CameraConfig, HitPolicy, PrimitiveDesc, RenderSettings, SceneDocument};
