use crate::error::LevelError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn one() -> f32 {
    1.0
}
fn default_atlas() -> PathBuf {
    PathBuf::from("tiles.atlas.json")
}

/// Settings for building a [`LevelConverter`](crate::LevelConverter).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConverterConfig {
    /// World units per authoring pixel
    #[serde(default = "one")]
    pub scale: f32,
    /// Atlas description file
    #[serde(default = "default_atlas")]
    pub atlas: PathBuf,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            scale: one(),
            atlas: default_atlas(),
        }
    }
}

impl ConverterConfig {
    /// Parses settings, missing keys fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|source| LevelError::Io {
            path: p.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&txt).map_err(|source| LevelError::Json {
            path: p.to_path_buf(),
            source,
        })
    }
}
