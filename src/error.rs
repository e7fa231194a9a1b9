use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading or converting a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level has no `Entities` layer.
    #[error("Entities layer missing from level")]
    MissingEntityLayer,
    /// The entity layer has no entity with the player identifier.
    #[error("{identifier} missing from entity layer")]
    MissingPlayer {
        /// Identifier that was searched for
        identifier: String,
    },
    /// No level with this identifier exists in the project.
    #[error("Level not found: {0}")]
    LevelNotFound(String),
    /// The project file is structurally unusable.
    #[error("Invalid project: {0}")]
    InvalidProject(String),
    /// File I/O error
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// JSON parse error
    #[error("JSON parse error in {path}: {source}")]
    Json {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
    /// Sprite atlas or texture acquisition failed.
    #[error(transparent)]
    Asset(#[from] anyhow::Error),
}
