//! Error types for loading a garden scene.
//!
//! Only load-time paths (configuration, terrain and layout files, asset
//! worker setup) return these. Everything that runs inside a simulation tick
//! recovers locally instead of propagating an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the crate.
#[derive(Debug, Error)]
pub enum GardenError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("terrain error: {0}")]
    Terrain(String),

    #[error("asset worker error: {0}")]
    Assets(String),
}

/// Convenience alias used by the loaders.
pub type Result<T> = std::result::Result<T, GardenError>;

/// Read a whole file, tagging IO failures with the path.
pub(crate) fn read_to_string(path: impl Into<PathBuf>) -> Result<String> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| GardenError::Io { path, source })
}

/// Parse a JSON document read from `path`.
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    path: impl Into<PathBuf>,
    text: &str,
) -> Result<T> {
    serde_json::from_str(text).map_err(|source| GardenError::Json {
        path: path.into(),
        source,
    })
}
