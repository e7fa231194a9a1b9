use crate::atlas::{AtlasSource, FileAtlasSource, SpriteAtlas};
use crate::config::ConverterConfig;
use crate::error::LevelError;
use crate::format::*;
use crate::level::*;
use crate::sprite::{FlipFlags, Sprite};
use macroquad::prelude::*;
use std::cell::OnceCell;
use std::rc::Rc;

/// Entity identifier of the player spawn.
pub const PLAYER_IDENTIFIER: &str = "Player";
/// Player footprint in authoring units; not read from the level.
pub const PLAYER_SIZE: f32 = 16.0;

/// Turns LDtk levels into [`Level`]s.
///
/// The sprite atlas is acquired from `source` on the first conversion and
/// reused afterwards. A converter is meant for one thread.
pub struct LevelConverter<S: AtlasSource> {
    scale: f32,
    source: S,
    atlas: OnceCell<Rc<SpriteAtlas<S::Texture>>>,
}

impl LevelConverter<FileAtlasSource> {
    /// Converter over the atlas file named in `config`.
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.scale, FileAtlasSource::new(&config.atlas))
    }
}

impl<S: AtlasSource> LevelConverter<S> {
    /// Converter applying `scale` to every spatial value.
    pub fn new(scale: f32, source: S) -> Self {
        Self {
            scale,
            source,
            atlas: OnceCell::new(),
        }
    }

    /// World units per authoring pixel.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn atlas(&self) -> Result<Rc<SpriteAtlas<S::Texture>>, LevelError> {
        if let Some(atlas) = self.atlas.get() {
            return Ok(Rc::clone(atlas));
        }
        let loaded = Rc::new(self.source.load_atlas()?);
        tracing::debug!(regions = loaded.len(), "sprite atlas loaded");
        Ok(Rc::clone(self.atlas.get_or_init(|| loaded)))
    }

    /// Converts one level. Fails without output when the entity layer or the
    /// player is missing; unresolved tilesets and tiles are skipped.
    pub fn convert(
        &self,
        level: &LevelDefinition,
        definitions: &Definitions,
    ) -> Result<Level<S::Texture>, LevelError> {
        let layers: Vec<&LayerInstance> = level.layers().iter().rev().collect();

        let player = find_player(&layers)?;
        let atlas = self.atlas()?;

        let sprite_layers: Vec<_> = layers
            .iter()
            .filter_map(|layer| self.to_sprite_layer(layer, definitions, &atlas))
            .collect();

        let static_bodies = layers
            .iter()
            .find(|l| l.kind() == LayerKind::IntGrid)
            .map(|l| self.to_boxes(l))
            .unwrap_or_default();

        let s = self.scale;
        let player = PlayerSpawn {
            atlas: Rc::clone(&atlas),
            bounds: Rect::new(
                player.px[0] as f32 * s,
                player.px[1] as f32 * s,
                PLAYER_SIZE * s,
                PLAYER_SIZE * s,
            ),
        };

        tracing::info!(
            level = %level.identifier,
            sprite_layers = sprite_layers.len(),
            static_bodies = static_bodies.len(),
            "level converted"
        );

        Ok(Level {
            statics: LevelStatics {
                sprite_layers,
                static_bodies,
            },
            player,
        })
    }

    /// Solid cells of an IntGrid layer as world-space boxes.
    fn to_boxes(&self, layer: &LayerInstance) -> Vec<Rect> {
        let width = layer.c_wid.max(1) as usize;
        let cell = layer.grid_size as f32 * self.scale;

        layer
            .int_grid_csv
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1)
            .map(|(idx, _)| {
                let col = idx % width;
                let row = idx / width;
                Rect::new(col as f32 * cell, row as f32 * cell, cell, cell)
            })
            .collect()
    }

    fn to_sprite_layer(
        &self,
        layer: &LayerInstance,
        definitions: &Definitions,
        atlas: &Rc<SpriteAtlas<S::Texture>>,
    ) -> Option<SpriteLayer<S::Texture>> {
        if layer.kind() != LayerKind::AutoLayer {
            return None;
        }

        let Some(tileset) = layer.tileset_def_uid.and_then(|uid| definitions.tileset(uid))
        else {
            tracing::debug!(uid = ?layer.tileset_def_uid, "tileset not found, skipping layer");
            return None;
        };

        let sprites = layer
            .auto_layer_tiles
            .iter()
            .filter_map(|tile| self.to_sprite(tile, tileset, atlas))
            .collect();

        Some(SpriteLayer {
            atlas: Rc::clone(atlas),
            sprites,
        })
    }

    fn to_sprite(
        &self,
        tile: &TileInstance,
        tileset: &TilesetDefinition,
        atlas: &SpriteAtlas<S::Texture>,
    ) -> Option<Sprite> {
        let Some(key) = tileset.custom_data_for(tile.t) else {
            tracing::trace!(tile = tile.t, tileset = tileset.uid, "tile has no custom data");
            return None;
        };
        let Some(mut sprite) = atlas.create_sprite(key) else {
            tracing::debug!(key, "atlas has no region for tile");
            return None;
        };

        let flags = FlipFlags(tile.f);
        sprite.origin = Vec2::ZERO;
        sprite.scale = self.scale;
        sprite.position = vec2(tile.px[0] as f32, tile.px[1] as f32) * self.scale;
        sprite.flip_x = flags.flip_x();
        sprite.flip_y = flags.render_flip_y();
        Some(sprite)
    }
}

fn find_player<'a>(layers: &[&'a LayerInstance]) -> Result<&'a EntityInstance, LevelError> {
    let entities: &'a LayerInstance = layers
        .iter()
        .copied()
        .find(|l| l.kind() == LayerKind::Entities)
        .ok_or(LevelError::MissingEntityLayer)?;

    entities
        .entity_instances
        .iter()
        .find(|e| e.identifier == PLAYER_IDENTIFIER)
        .ok_or_else(|| LevelError::MissingPlayer {
            identifier: PLAYER_IDENTIFIER.to_owned(),
        })
}
