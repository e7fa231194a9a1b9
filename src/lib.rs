#![warn(missing_docs)]

//! LDtk level converter & render states for Macroquad.

mod atlas;
mod config;
mod converter;
mod error;
mod format;
mod level;
mod loader {
    pub mod ldtk_json;
}
pub mod render;
mod sprite;

pub use atlas::{AtlasSource, FileAtlasSource, SpriteAtlas};
pub use config::ConverterConfig;
pub use converter::{LevelConverter, PLAYER_IDENTIFIER, PLAYER_SIZE};
pub use error::LevelError;
pub use format::{
    Definitions, EntityInstance, LayerInstance, LayerKind, LdtkProject, LevelDefinition,
    TileCustomData, TileInstance, TilesetDefinition,
};
pub use level::{Level, LevelStatics, PlayerSpawn, SpriteLayer};
pub use loader::ldtk_json::{decode_project_file, decode_project_str};
pub use render::{Render, Viewpoint};
pub use sprite::{FlipFlags, Sprite};
