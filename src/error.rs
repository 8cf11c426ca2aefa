//! Level loading errors

use std::path::PathBuf;

/// Failure to bring a level up. The level is unusable until a successful init.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map has no cells ({rows} rows x {columns} columns)")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("{layer} layer is {found}, expected {expected}")]
    LayerShape {
        layer: &'static str,
        expected: String,
        found: String,
    },
    #[error("invalid tile size {0} (must be a positive pixel count)")]
    InvalidTileSize(f32),
}

impl LevelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
