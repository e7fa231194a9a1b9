use macroquad::prelude::*;
use macroquad_ldtk_level::render::ScreenTarget;
use macroquad_ldtk_level::{decode_project_file, ConverterConfig, LevelConverter, Viewpoint};
use tracing_subscriber::EnvFilter;

// Override the default 800 × 450 pixels here
fn window_conf() -> Conf {
    Conf {
        window_title: "Level Viewer".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e:#}");
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ConverterConfig::load("assets/converter.json").unwrap_or_default();
    let project = decode_project_file("assets/world.ldtk")?;
    let converter = LevelConverter::from_config(&config);
    let level = converter.convert(project.level("Level_0")?, &project.defs)?;

    let camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, 40.0, 22.5));
    let mut player = level.player.blueprint();

    loop {
        clear_background(BLACK);
        set_camera(&camera);

        let viewpoint = Viewpoint::from_camera(&camera);
        let mut target = ScreenTarget::default();
        for layer in &level.statics.sprite_layers {
            layer.draw(&mut target);
        }
        for body in &level.statics.static_bodies {
            draw_rectangle_lines(body.x, body.y, body.w, body.h, 0.05, GREEN);
        }

        player.advance_time(get_frame_time());
        player.draw(&mut target, &viewpoint);
        let b = player.bounds();
        draw_rectangle_lines(b.x, b.y, b.w, b.h, 0.05, RED);

        set_default_camera();
        draw_text(
            &format!("FPS: {}", get_fps()),
            screen_width() - 135.0,
            55.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
}
