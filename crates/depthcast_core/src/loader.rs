//! Scene document loading.
//!
//! Scene documents are JSON. A missing `camera` or `render` block falls back
//! to defaults; a missing `primitives` list gives an empty scene.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDocument;

/// Errors that can occur while loading a scene document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return LoadError::Io(std::io::Error::other(err));
        }
        LoadError::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene document from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDocument> {
    let path = path.as_ref();
    log::debug!("Loading scene document from {}", path.display());

    let text = fs::read_to_string(path)?;
    let doc = load_scene_from_str(&text)?;

    log::info!(
        "Loaded {} primitives from {}",
        doc.primitives.len(),
        path.display()
    );
    Ok(doc)
}

/// Parse a scene document from a JSON string.
pub fn load_scene_from_str(text: &str) -> LoadResult<SceneDocument> {
    let doc: SceneDocument = serde_json::from_str(text)?;
    for prim in &doc.primitives {
        log::trace!("Scene primitive '{}' ({})", prim.id(), prim.kind());
    }
    Ok(doc)
}
