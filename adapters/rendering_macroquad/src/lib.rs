#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for CaveQuest.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature; sound cues fall back to the logging sink.
//!
//! The backend paints into a persistent 128x128 offscreen target and blits it
//! to the window at an integer scale. Because the target survives between
//! frames, only the cells the scene marks dirty are repainted, the same
//! pixel-retention model as the small LCD the game imitates.

mod config;
mod sprites;
mod ui;

pub use config::{BackendConfig, ConfigError};

use anyhow::Result;
use cavequest_core::ButtonState;
use cavequest_rendering::{
    Color, Presentation, RenderingBackend, Scene, SCREEN_PIXELS,
};
use macroquad::{
    camera::{set_camera, set_default_camera, Camera2D},
    color::{BLACK, WHITE},
    input::{is_key_pressed, KeyCode},
    math::{vec2, Rect},
    texture::{render_target, DrawTextureParams, FilterMode},
    time::get_frame_time,
    window::{clear_background, next_frame},
};
use std::time::{Duration, Instant};

pub(crate) fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

/// Captures one edge-triggered input snapshot.
///
/// `is_key_pressed` reports only the frame a key went down, so holding a key
/// yields exactly one resolved command per press.
fn poll_buttons() -> ButtonState {
    ButtonState {
        action: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter),
        menu: is_key_pressed(KeyCode::M),
        up: is_key_pressed(KeyCode::Up),
        down: is_key_pressed(KeyCode::Down),
        left: is_key_pressed(KeyCode::Left),
        right: is_key_pressed(KeyCode::Right),
        center: is_key_pressed(KeyCode::F),
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    config: BackendConfig,
}

impl MacroquadBackend {
    /// Creates a backend with the provided configuration.
    #[must_use]
    pub const fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    /// Overrides the window scale factor.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.config.scale = scale;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, ButtonState, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;
        let BackendConfig { scale, .. } = self.config;
        let frame_budget = self.config.frame_budget();
        let window_side = (SCREEN_PIXELS * scale).round() as i32;

        let window_config = macroquad::window::Conf {
            window_title,
            window_width: window_side,
            window_height: window_side,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };

        macroquad::Window::from_config(window_config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);

            let target = render_target(SCREEN_PIXELS as u32, SCREEN_PIXELS as u32);
            target.texture.set_filter(FilterMode::Nearest);
            let mut camera =
                Camera2D::from_display_rect(Rect::new(0.0, 0.0, SCREEN_PIXELS, SCREEN_PIXELS));
            camera.render_target = Some(target);

            let mut first_frame = true;

            loop {
                let frame_start = Instant::now();
                if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                    break;
                }

                let buttons = poll_buttons();
                let frame_dt = Duration::from_secs_f32(get_frame_time().max(0.0));
                update_scene(frame_dt, buttons, &mut scene);

                set_camera(&camera);
                if first_frame {
                    clear_background(background);
                    first_frame = false;
                }
                if scene.game_over {
                    ui::draw_game_over();
                } else {
                    for cell in scene.cells.iter().filter(|cell| cell.dirty) {
                        sprites::paint_cell(cell);
                    }
                    sprites::paint_player(&scene.player);
                    scene.mark_painted();
                    if let Some(speech) = &scene.speech {
                        ui::draw_speech(speech);
                    }
                }
                ui::draw_status(&scene.status);
                set_default_camera();

                clear_background(BLACK);
                macroquad::texture::draw_texture_ex(
                    target.texture,
                    0.0,
                    0.0,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(SCREEN_PIXELS * scale, SCREEN_PIXELS * scale)),
                        flip_y: true,
                        ..DrawTextureParams::default()
                    },
                );

                let elapsed = frame_start.elapsed();
                if elapsed < frame_budget {
                    std::thread::sleep(frame_budget - elapsed);
                }

                next_frame().await;
            }
        });

        Ok(())
    }
}

/// The solid color painted behind the viewport on the first frame.
#[must_use]
pub fn default_clear_color() -> Color {
    sprites::GROUND
}
