use crate::render::DrawTarget;
use macroquad::prelude::*;

const FLIP_X: u8 = 0b01; // bit 0
const FLIP_Y: u8 = 0b10; // bit 1

/// LDtk tile flip bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlipFlags(pub u8);

impl FlipFlags {
    /// Horizontal flip.
    #[inline] pub fn flip_x(self) -> bool { (self.0 & FLIP_X) != 0 }
    /// Vertical flip as stored, y pointing down.
    #[inline] pub fn flip_y(self) -> bool { (self.0 & FLIP_Y) != 0 }

    /// Vertical flip on the rendering axis. LDtk stores y pointing down, the
    /// renderer's sprite axis points up, so the stored bit is inverted.
    #[inline] pub fn render_flip_y(self) -> bool { !self.flip_y() }
}

/// A positioned, scaled, optionally flipped atlas region.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Source rectangle in the atlas texture, in pixels
    pub region: Rect,
    /// Placement in world units
    pub position: Vec2,
    /// Pivot for scaling, relative to `position`
    pub origin: Vec2,
    /// Uniform scale
    pub scale: f32,
    /// Mirror horizontally
    pub flip_x: bool,
    /// Mirror vertically, y-up convention
    pub flip_y: bool,
}

impl Sprite {
    /// Unscaled sprite at the origin covering `region`.
    pub fn new(region: Rect) -> Self {
        Self {
            region,
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            scale: 1.0,
            flip_x: false,
            flip_y: false,
        }
    }

    /// Unscaled width, taken from the region.
    pub fn width(&self) -> f32 {
        self.region.w
    }

    /// Unscaled height, taken from the region.
    pub fn height(&self) -> f32 {
        self.region.h
    }

    /// Tight axis-aligned rectangle around the sprite's current transform.
    pub fn bounding_rect(&self) -> Rect {
        let x = self.position.x + self.origin.x * (1.0 - self.scale);
        let y = self.position.y + self.origin.y * (1.0 - self.scale);
        let w = self.width() * self.scale;
        let h = self.height() * self.scale;
        // negative scale mirrors around the origin
        Rect::new(x.min(x + w), y.min(y + h), w.abs(), h.abs())
    }

    /// Draws the region of `texture` over the bounding rect.
    pub fn draw<T>(&self, target: &mut dyn DrawTarget<T>, texture: &T) {
        let flip_y = if target.y_up() { self.flip_y } else { !self.flip_y };
        target.draw_region(texture, self.region, self.bounding_rect(), self.flip_x, flip_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_flip_bits() {
        let both = FlipFlags(3);
        assert!(both.flip_x());
        assert!(both.flip_y());
        assert!(!both.render_flip_y());

        let none = FlipFlags(0);
        assert!(!none.flip_x());
        assert!(none.render_flip_y());

        let x_only = FlipFlags(1);
        assert!(x_only.flip_x());
        assert!(x_only.render_flip_y());
    }

    #[test]
    fn bounding_rect_follows_scale_and_origin() {
        let mut sprite = Sprite::new(Rect::new(16.0, 0.0, 16.0, 8.0));
        sprite.position = vec2(10.0, 20.0);
        sprite.scale = 2.0;
        assert_eq!(sprite.bounding_rect(), Rect::new(10.0, 20.0, 32.0, 16.0));

        sprite.origin = vec2(8.0, 4.0);
        assert_eq!(sprite.bounding_rect(), Rect::new(2.0, 16.0, 32.0, 16.0));
    }

    #[test]
    fn bounding_rect_is_recomputed_after_moves() {
        let mut sprite = Sprite::new(Rect::new(0.0, 0.0, 4.0, 4.0));
        let before = sprite.bounding_rect();
        sprite.position.x += 3.0;
        assert_eq!(sprite.bounding_rect().x, before.x + 3.0);
    }
}
