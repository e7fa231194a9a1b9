// src/loader/ldtk_json.rs
use crate::error::LevelError;
use crate::format::*;
use std::path::Path;

impl LdtkProject {
    /// Level with the given editor identifier.
    pub fn level(&self, identifier: &str) -> Result<&LevelDefinition, LevelError> {
        self.levels
            .iter()
            .find(|l| l.identifier == identifier)
            .ok_or_else(|| LevelError::LevelNotFound(identifier.to_owned()))
    }
}

/// Parses an LDtk project from its JSON text.
pub fn decode_project_str(json: &str) -> Result<LdtkProject, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads and parses a `.ldtk` or `.json` project file.
pub fn decode_project_file(path: impl AsRef<Path>) -> Result<LdtkProject, LevelError> {
    let p = path.as_ref();
    match p.extension().and_then(|e| e.to_str()) {
        Some("ldtk") | Some("json") => {}
        _ => {
            return Err(LevelError::InvalidProject(format!(
                "Project file must be .ldtk or .json: {}",
                p.display()
            )))
        }
    }

    let txt = std::fs::read_to_string(p).map_err(|source| LevelError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let project = decode_project_str(&txt).map_err(|source| LevelError::Json {
        path: p.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %p.display(),
        levels = project.levels.len(),
        tilesets = project.defs.tilesets.len(),
        "project decoded"
    );
    Ok(project)
}
