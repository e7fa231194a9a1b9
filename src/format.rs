//! Passive LDtk data as decoded from the project JSON.
//!
//! Only the fields the converter reads are modelled; everything else in the
//! file is ignored by `serde`.

use serde::Deserialize;

/// Whole LDtk project: definitions plus every level.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LdtkProject {
    /// Shared definitions (tilesets, ...)
    #[serde(default)]
    pub defs: Definitions,
    /// Levels in authoring order
    #[serde(default)]
    pub levels: Vec<LevelDefinition>,
}

/// Project-wide definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Definitions {
    /// Tileset definitions
    #[serde(default)]
    pub tilesets: Vec<TilesetDefinition>,
}

impl Definitions {
    /// Tileset with the given unique id.
    pub fn tileset(&self, uid: i64) -> Option<&TilesetDefinition> {
        self.tilesets.iter().find(|t| t.uid == uid)
    }
}

/// A tileset and its per-tile custom data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetDefinition {
    /// Unique id referenced from tile layers
    pub uid: i64,
    /// Editor identifier
    #[serde(default)]
    pub identifier: String,
    /// Custom data attached to individual tiles
    #[serde(default)]
    pub custom_data: Vec<TileCustomData>,
}

impl TilesetDefinition {
    /// Custom data string for a tile, used as a key into the sprite atlas.
    pub fn custom_data_for(&self, tile_id: i64) -> Option<&str> {
        self.custom_data
            .iter()
            .find(|d| d.tile_id == tile_id)
            .map(|d| d.data.as_str())
    }
}

/// Custom data of a single tile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileCustomData {
    /// Tile id inside its tileset
    pub tile_id: i64,
    /// Opaque payload
    pub data: String,
}

/// A single level.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    /// Editor identifier of the level
    #[serde(default)]
    pub identifier: String,
    /// Layers, topmost first. `null` in the file means no layers.
    #[serde(default)]
    pub layer_instances: Option<Vec<LayerInstance>>,
}

impl LevelDefinition {
    /// Layers in authoring order, empty when none were saved.
    pub fn layers(&self) -> &[LayerInstance] {
        self.layer_instances.as_deref().unwrap_or(&[])
    }
}

/// Layer classification by its `__type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Tiles placed by auto-layer rules
    AutoLayer,
    /// Integer occupancy grid
    IntGrid,
    /// Entity instances
    Entities,
    /// Anything else
    Other,
}

/// One layer of a level.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInstance {
    /// Layer type tag: `AutoLayer`, `IntGrid`, `Entities`, `Tiles`, ...
    #[serde(rename = "__type")]
    pub layer_type: String,
    /// Width in cells
    #[serde(rename = "__cWid", default)]
    pub c_wid: i64,
    /// Cell size in pixels
    #[serde(rename = "__gridSize", default)]
    pub grid_size: i64,
    /// Tileset used by tile layers
    #[serde(rename = "__tilesetDefUid", default)]
    pub tileset_def_uid: Option<i64>,
    /// Tiles generated by auto-layer rules
    #[serde(default)]
    pub auto_layer_tiles: Vec<TileInstance>,
    /// Occupancy values, row-major
    #[serde(default)]
    pub int_grid_csv: Vec<i64>,
    /// Entities on this layer
    #[serde(default)]
    pub entity_instances: Vec<EntityInstance>,
}

impl LayerInstance {
    /// Classifies the layer by its type tag.
    pub fn kind(&self) -> LayerKind {
        match self.layer_type.as_str() {
            "AutoLayer" => LayerKind::AutoLayer,
            "IntGrid" => LayerKind::IntGrid,
            "Entities" => LayerKind::Entities,
            _ => LayerKind::Other,
        }
    }
}

/// A placed tile.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TileInstance {
    /// Pixel position `[x, y]`
    pub px: [i64; 2],
    /// Tile id in the layer's tileset
    pub t: i64,
    /// Flip bits: 0 = x, 1 = y
    #[serde(default)]
    pub f: u8,
}

/// A placed entity.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityInstance {
    /// Entity definition identifier, e.g. `Player`
    #[serde(rename = "__identifier")]
    pub identifier: String,
    /// Pixel position `[x, y]`
    pub px: [i64; 2],
}
