use crate::sprite::Sprite;
use anyhow::Context;
use macroquad::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A texture and the named regions cut out of it.
///
/// `T` is the texture handle; macroquad's `Texture2D` at runtime.
pub struct SpriteAtlas<T = Texture2D> {
    /// Texture every region is cut from
    pub texture: T,
    regions: HashMap<String, Rect>,
}

impl<T> SpriteAtlas<T> {
    /// Atlas over `texture` with regions in pixels.
    pub fn new(texture: T, regions: HashMap<String, Rect>) -> Self {
        Self { texture, regions }
    }

    /// Pixel rectangle of a named region.
    pub fn region(&self, key: &str) -> Option<Rect> {
        self.regions.get(key).copied()
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when the atlas has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Sprite sized to the region, unit scale and zero origin.
    pub fn create_sprite(&self, key: &str) -> Option<Sprite> {
        self.region(key).map(Sprite::new)
    }

    /// Regions whose key starts with `prefix`, ordered by key. Used to
    /// assemble animation frames such as `player/run_0`, `player/run_1`.
    pub fn regions_with_prefix(&self, prefix: &str) -> Vec<Rect> {
        let mut matching: Vec<_> = self
            .regions
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();
        matching.sort_unstable_by(|a, b| a.0.cmp(b.0));
        matching.into_iter().map(|(_, r)| *r).collect()
    }
}

impl<T> std::fmt::Debug for SpriteAtlas<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteAtlas")
            .field("regions", &self.regions.len())
            .finish()
    }
}

/// Something that can produce the sprite atlas on demand.
///
/// The converter calls this at most once and caches the result.
pub trait AtlasSource {
    /// Texture handle of the produced atlas
    type Texture;

    /// Builds the atlas, reading whatever assets it needs.
    fn load_atlas(&self) -> anyhow::Result<SpriteAtlas<Self::Texture>>;
}

impl<F, T> AtlasSource for F
where
    F: Fn() -> anyhow::Result<SpriteAtlas<T>>,
{
    type Texture = T;

    fn load_atlas(&self) -> anyhow::Result<SpriteAtlas<T>> {
        self()
    }
}

#[derive(Deserialize)]
struct JsonRegion {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct JsonAtlas {
    image: String, // relative to the description file
    #[serde(default)]
    regions: HashMap<String, JsonRegion>,
}

fn parse_atlas_file(path: &Path) -> anyhow::Result<(JsonAtlas, PathBuf)> {
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("Reading atlas file {}", path.display()))?;
    let j: JsonAtlas = serde_json::from_str(&txt)
        .with_context(|| format!("Parsing atlas file {}", path.display()))?;

    let atlas_dir = path
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));

    Ok((j, atlas_dir))
}

/// Loads an atlas from a JSON description next to its image:
///
/// ```json
/// { "image": "tiles.png", "regions": { "grass": { "x": 0, "y": 0, "width": 16, "height": 16 } } }
/// ```
#[derive(Debug, Clone)]
pub struct FileAtlasSource {
    /// Atlas description file
    pub path: PathBuf,
}

impl FileAtlasSource {
    /// Source reading the description at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AtlasSource for FileAtlasSource {
    type Texture = Texture2D;

    fn load_atlas(&self) -> anyhow::Result<SpriteAtlas> {
        let (j, atlas_dir) = parse_atlas_file(&self.path)?;

        let img_path = atlas_dir.join(&j.image);
        let bytes = std::fs::read(&img_path)
            .with_context(|| format!("Reading texture {}", img_path.display()))?;
        let image = Image::from_file_with_format(&bytes, None)
            .map_err(|e| anyhow::anyhow!("Decoding texture {}: {e}", img_path.display()))?;
        let tex = Texture2D::from_image(&image);
        tex.set_filter(FilterMode::Nearest);

        let regions = j
            .regions
            .into_iter()
            .map(|(k, r)| (k, Rect::new(r.x, r.y, r.width, r.height)))
            .collect();

        Ok(SpriteAtlas::new(tex, regions))
    }
}
