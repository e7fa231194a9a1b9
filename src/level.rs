use crate::atlas::SpriteAtlas;
use crate::render::{Blueprint, DrawTarget, Render};
use crate::sprite::Sprite;
use macroquad::prelude::*;
use std::rc::Rc;

/// Result of converting one level. Immutable once produced.
#[derive(Debug)]
pub struct Level<T = Texture2D> {
    /// Static geometry and tile sprites
    pub statics: LevelStatics<T>,
    /// Where the player starts
    pub player: PlayerSpawn<T>,
}

/// Everything in a level that never moves.
#[derive(Debug)]
pub struct LevelStatics<T = Texture2D> {
    /// Back to front: the first-authored layer comes last.
    pub sprite_layers: Vec<SpriteLayer<T>>,
    /// Solid cells, in world units.
    pub static_bodies: Vec<Rect>,
}

/// Sprites produced from one tile layer.
#[derive(Debug)]
pub struct SpriteLayer<T = Texture2D> {
    /// Atlas the sprites' regions belong to
    pub atlas: Rc<SpriteAtlas<T>>,
    /// Placements in layer order
    pub sprites: Vec<Sprite>,
}

impl<T> SpriteLayer<T> {
    /// Draws every sprite in order.
    pub fn draw(&self, target: &mut dyn DrawTarget<T>) {
        for sprite in &self.sprites {
            sprite.draw(target, &self.atlas.texture);
        }
    }
}

impl<T> Clone for SpriteLayer<T> {
    fn clone(&self) -> Self {
        Self {
            atlas: Rc::clone(&self.atlas),
            sprites: self.sprites.clone(),
        }
    }
}

/// Player start position.
#[derive(Debug)]
pub struct PlayerSpawn<T = Texture2D> {
    /// Atlas holding the player's sprites
    pub atlas: Rc<SpriteAtlas<T>>,
    /// Spawn footprint in world units
    pub bounds: Rect,
}

impl<T> PlayerSpawn<T> {
    /// Placeholder render state covering the spawn footprint.
    pub fn blueprint(&self) -> Render<T> {
        Render::Blueprint(Blueprint::new(self.bounds))
    }
}
