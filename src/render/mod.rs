//! Per-entity render states.
//!
//! A [`Render`] is one of a closed set of visuals. The render loop calls
//! [`Render::advance_time`] and [`Render::draw`] once per frame on every live
//! instance; none of the variants can fail.

mod animation;

pub use animation::{Animation, PlayMode};

use crate::sprite::Sprite;
use macroquad::prelude::*;

/// Authoring pixels per world unit for background images.
pub const UNITS_PER_TILE: f32 = 16.0;

/// What the camera currently sees, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    /// Camera position
    pub center: Vec2,
    /// Visible width and height
    pub size: Vec2,
}

impl Viewpoint {
    /// Viewpoint centred on `center` seeing `size` world units.
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Viewpoint of a macroquad camera.
    pub fn from_camera(cam: &Camera2D) -> Self {
        // Camera2D::from_display_rect sets zoom = 2 / size
        let size = vec2(2.0 / cam.zoom.x.abs(), 2.0 / cam.zoom.y.abs());
        Self::new(cam.target, size)
    }

    /// Visible area as a rectangle anchored at its minimum corner.
    pub fn visible_rect(&self) -> Rect {
        let min = self.center - self.size / 2.0;
        Rect::new(min.x, min.y, self.size.x, self.size.y)
    }
}

/// Where render states submit textured quads.
///
/// `T` is the texture handle the target knows how to draw.
pub trait DrawTarget<T = Texture2D> {
    /// Draws `source` of `texture` stretched over `dest`.
    fn draw_region(&mut self, texture: &T, source: Rect, dest: Rect, flip_x: bool, flip_y: bool);

    /// Whether world y grows upwards on this target. Tile sprites carry
    /// their vertical flip for a y-up world and are re-inverted otherwise.
    fn y_up(&self) -> bool {
        true
    }
}

/// Draws straight into macroquad's current camera.
///
/// Macroquad's default and `from_display_rect` cameras point y down, so
/// `y_up` is false unless the game sets up a y-up camera itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenTarget {
    /// The active camera points y up
    pub y_up: bool,
}

/// Texture parameters for drawing `source` over `dest`.
pub fn screen_params(source: Rect, dest: Rect, flip_x: bool, flip_y: bool) -> DrawTextureParams {
    DrawTextureParams {
        dest_size: Some(vec2(dest.w, dest.h)),
        source: Some(source),
        flip_x,
        flip_y,
        ..Default::default()
    }
}

impl DrawTarget for ScreenTarget {
    fn draw_region(
        &mut self,
        texture: &Texture2D,
        source: Rect,
        dest: Rect,
        flip_x: bool,
        flip_y: bool,
    ) {
        draw_texture_ex(
            texture,
            dest.x,
            dest.y,
            WHITE,
            screen_params(source, dest, flip_x, flip_y),
        );
    }

    fn y_up(&self) -> bool {
        self.y_up
    }
}

/// Bounds only. Never draws; used as a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    bounds: Rect,
}

impl Blueprint {
    /// Placeholder occupying `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }
}

/// One parallax image of a background.
#[derive(Debug, Clone)]
pub struct BackgroundLayer<T = Texture2D> {
    texture: T,
    region: Rect,
    factor: f32,
}

impl<T> BackgroundLayer<T> {
    /// `factor` is the fraction of the camera's x position subtracted from
    /// the layer's anchor.
    pub fn new(texture: T, region: Rect, factor: f32) -> Self {
        Self {
            texture,
            region,
            factor,
        }
    }

    /// Where the layer lands for this viewpoint.
    pub fn dest_rect(&self, viewpoint: &Viewpoint) -> Rect {
        let x_offset = viewpoint.center.x * self.factor;
        let visible = viewpoint.visible_rect();
        Rect::new(
            visible.x - x_offset,
            visible.y,
            self.region.w / UNITS_PER_TILE,
            self.region.h / UNITS_PER_TILE,
        )
    }

    /// Draws the layer relative to the viewpoint.
    pub fn draw(&self, target: &mut dyn DrawTarget<T>, viewpoint: &Viewpoint) {
        target.draw_region(
            &self.texture,
            self.region,
            self.dest_rect(viewpoint),
            false,
            false,
        );
    }
}

/// Static background made of parallax layers, drawn in order.
#[derive(Debug, Clone)]
pub struct BackgroundRender<T = Texture2D> {
    layers: Vec<BackgroundLayer<T>>,
}

impl<T> BackgroundRender<T> {
    /// Background drawing `layers` first to last.
    pub fn new(layers: Vec<BackgroundLayer<T>>) -> Self {
        Self { layers }
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[BackgroundLayer<T>] {
        &self.layers
    }
}

/// A single static sprite.
#[derive(Debug, Clone)]
pub struct SpriteRender<T = Texture2D> {
    texture: T,
    /// The drawn sprite; bounds follow its transform
    pub sprite: Sprite,
}

impl<T> SpriteRender<T> {
    /// Render drawing `sprite` from `texture`.
    pub fn new(texture: T, sprite: Sprite) -> Self {
        Self { texture, sprite }
    }
}

/// Keyframed animation drawn at fixed bounds.
#[derive(Debug, Clone)]
pub struct AnimationRender<T = Texture2D> {
    texture: T,
    animation: Animation,
    bounds: Rect,
    elapsed: f32,
}

impl<T> AnimationRender<T> {
    /// Render playing `animation` from the start over `bounds`.
    pub fn new(texture: T, animation: Animation, bounds: Rect) -> Self {
        Self {
            texture,
            animation,
            bounds,
            elapsed: 0.0,
        }
    }

    /// Seconds accumulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Visual representation of an entity.
#[derive(Debug, Clone)]
pub enum Render<T = Texture2D> {
    /// Placeholder with bounds only
    Blueprint(Blueprint),
    /// Parallax background
    Background(BackgroundRender<T>),
    /// Static sprite
    Sprite(SpriteRender<T>),
    /// Time-driven animation
    Animation(AnimationRender<T>),
}

impl<T> Render<T> {
    /// Draws the current state for this viewpoint.
    pub fn draw(&self, target: &mut dyn DrawTarget<T>, viewpoint: &Viewpoint) {
        match self {
            Render::Blueprint(_) => {}
            Render::Background(bg) => {
                for layer in &bg.layers {
                    layer.draw(target, viewpoint);
                }
            }
            Render::Sprite(s) => s.sprite.draw(target, &s.texture),
            Render::Animation(a) => {
                if let Some(frame) = a.animation.key_frame(a.elapsed) {
                    target.draw_region(&a.texture, frame, a.bounds, false, false);
                }
            }
        }
    }

    /// Adds `delta` seconds to time-driven states.
    pub fn advance_time(&mut self, delta: f32) {
        if let Render::Animation(a) = self {
            a.elapsed += delta;
        }
    }

    /// World-space bounds used for spatial queries.
    pub fn bounds(&self) -> Rect {
        match self {
            Render::Blueprint(b) => b.bounds,
            // backgrounds take no part in spatial queries
            Render::Background(_) => Rect::default(),
            Render::Sprite(s) => s.sprite.bounding_rect(),
            Render::Animation(a) => a.bounds,
        }
    }
}

impl<T> From<Blueprint> for Render<T> {
    fn from(b: Blueprint) -> Self {
        Render::Blueprint(b)
    }
}

impl<T> From<BackgroundRender<T>> for Render<T> {
    fn from(b: BackgroundRender<T>) -> Self {
        Render::Background(b)
    }
}

impl<T> From<SpriteRender<T>> for Render<T> {
    fn from(s: SpriteRender<T>) -> Self {
        Render::Sprite(s)
    }
}

impl<T> From<AnimationRender<T>> for Render<T> {
    fn from(a: AnimationRender<T>) -> Self {
        Render::Animation(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        y_up: bool,
        calls: Vec<(Rect, Rect, bool, bool)>,
    }

    impl Recorder {
        fn new(y_up: bool) -> Self {
            Self {
                y_up,
                calls: Vec::new(),
            }
        }
    }

    impl DrawTarget<()> for Recorder {
        fn draw_region(&mut self, _: &(), source: Rect, dest: Rect, fx: bool, fy: bool) {
            self.calls.push((source, dest, fx, fy));
        }

        fn y_up(&self) -> bool {
            self.y_up
        }
    }

    fn view() -> Viewpoint {
        Viewpoint::new(vec2(10.0, 5.0), vec2(20.0, 10.0))
    }

    #[test]
    fn blueprint_never_draws_or_changes() {
        let bounds = Rect::new(1.0, 2.0, 3.0, 4.0);
        let mut render: Render<()> = Render::from(Blueprint::new(bounds));
        let mut rec = Recorder::new(true);
        render.advance_time(1.0);
        render.draw(&mut rec, &view());
        assert!(rec.calls.is_empty());
        assert_eq!(render.bounds(), bounds);
    }

    #[test]
    fn background_layers_draw_in_order_with_parallax() {
        let region = Rect::new(0.0, 0.0, 320.0, 160.0);
        let mut render: Render<()> = Render::from(BackgroundRender::new(vec![
            BackgroundLayer::new((), region, 0.0),
            BackgroundLayer::new((), region, 0.5),
        ]));
        let mut rec = Recorder::new(true);
        render.advance_time(3.0);
        render.draw(&mut rec, &view());

        assert_eq!(rec.calls.len(), 2);
        assert_eq!(rec.calls[0].1, Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(rec.calls[1].1, Rect::new(-5.0, 0.0, 20.0, 10.0));
        assert_eq!(render.bounds(), Rect::default());
    }

    #[test]
    fn sprite_render_bounds_track_the_sprite() {
        let mut sprite = Sprite::new(Rect::new(0.0, 0.0, 16.0, 16.0));
        sprite.position = vec2(4.0, 8.0);
        sprite.scale = 0.5;
        sprite.flip_y = true;
        let mut render: Render<()> = Render::from(SpriteRender::new((), sprite));
        assert_eq!(render.bounds(), Rect::new(4.0, 8.0, 8.0, 8.0));

        if let Render::Sprite(s) = &mut render {
            s.sprite.position.x = 6.0;
        }
        assert_eq!(render.bounds().x, 6.0);

        let mut rec = Recorder::new(true);
        render.draw(&mut rec, &view());
        assert_eq!(rec.calls, vec![(
            Rect::new(0.0, 0.0, 16.0, 16.0),
            Rect::new(6.0, 8.0, 8.0, 8.0),
            false,
            true
        )]);
    }

    #[test]
    fn sprite_vertical_flip_is_reinverted_on_y_down_targets() {
        // an unflipped LDtk tile carries flip_y = true for y-up worlds
        let mut sprite = Sprite::new(Rect::new(0.0, 0.0, 16.0, 16.0));
        sprite.flip_y = true;
        let render: Render<()> = Render::from(SpriteRender::new((), sprite));

        let mut rec = Recorder::new(false);
        render.draw(&mut rec, &view());
        assert!(!rec.calls[0].3);
    }

    #[test]
    fn screen_target_defaults_to_y_down() {
        assert!(!ScreenTarget::default().y_up());
        assert!(ScreenTarget { y_up: true }.y_up());
    }

    #[test]
    fn screen_params_map_source_dest_and_flips() {
        let params = screen_params(
            Rect::new(16.0, 0.0, 16.0, 16.0),
            Rect::new(2.0, 3.0, 1.0, 1.0),
            true,
            false,
        );
        assert_eq!(params.source, Some(Rect::new(16.0, 0.0, 16.0, 16.0)));
        assert_eq!(params.dest_size, Some(vec2(1.0, 1.0)));
        assert!(params.flip_x);
        assert!(!params.flip_y);
        assert_eq!(params.rotation, 0.0);
    }

    #[test]
    fn animation_time_is_additive() {
        let anim = Animation::new(0.5, vec![Rect::new(0.0, 0.0, 8.0, 8.0)], PlayMode::Loop);
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);

        let mut split: Render<()> = Render::from(AnimationRender::new((), anim.clone(), bounds));
        let mut once: Render<()> = Render::from(AnimationRender::new((), anim, bounds));
        split.advance_time(0.25);
        split.advance_time(0.5);
        once.advance_time(0.75);

        match (&split, &once) {
            (Render::Animation(a), Render::Animation(b)) => {
                assert_eq!(a.elapsed(), b.elapsed());
                assert_eq!(a.elapsed(), 0.75);
            }
            _ => panic!("expected animation renders"),
        }
    }

    #[test]
    fn animation_draws_current_frame_at_fixed_bounds() {
        let frames = vec![
            Rect::new(0.0, 0.0, 8.0, 8.0),
            Rect::new(8.0, 0.0, 8.0, 8.0),
        ];
        let bounds = Rect::new(3.0, 3.0, 2.0, 2.0);
        let mut render: Render<()> = Render::from(AnimationRender::new(
            (),
            Animation::new(0.5, frames.clone(), PlayMode::Loop),
            bounds,
        ));

        let mut rec = Recorder::new(false);
        render.draw(&mut rec, &view());
        render.advance_time(0.6);
        render.draw(&mut rec, &view());

        assert_eq!(rec.calls[0].0, frames[0]);
        assert_eq!(rec.calls[1].0, frames[1]);
        assert!(rec.calls.iter().all(|c| c.1 == bounds && !c.3));
        assert_eq!(render.bounds(), bounds);
    }

    #[test]
    fn viewpoint_from_camera_matches_display_rect() {
        let cam = Camera2D::from_display_rect(Rect::new(0.0, 0.0, 40.0, 30.0));
        let vp = Viewpoint::from_camera(&cam);
        assert!((vp.size.x - 40.0).abs() < 1e-4);
        assert!((vp.size.y - 30.0).abs() < 1e-4);
        assert_eq!(vp.center, vec2(20.0, 15.0));
    }
}
