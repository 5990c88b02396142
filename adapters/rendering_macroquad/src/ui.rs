//! Text chrome drawn around and over the viewport.
//!
//! All coordinates are logical pixels inside the offscreen target. The text
//! uses macroquad's built-in font at small sizes, matching the fixed-width
//! character budget the speech overlay enforces.

use cavequest_rendering::{Color, SpeechOverlay, StatusPresentation, SCREEN_PIXELS};
use macroquad::{
    shapes::{draw_rectangle, draw_rectangle_lines},
    text::draw_text,
};

use crate::to_macroquad_color;

const STATUS_BACKGROUND: Color = Color::from_rgb_u8(15, 56, 15);
const STATUS_TEXT: Color = Color::from_rgb_u8(155, 188, 15);
const SPEECH_BORDER: Color = Color::from_rgb_u8(200, 40, 40);
const SPEECH_FILL: Color = Color::from_rgb_u8(0, 0, 0);
const SPEECH_TEXT: Color = Color::from_rgb_u8(255, 255, 255);

/// Height of the status strip above the viewport.
const STATUS_HEIGHT: f32 = 14.0;

/// Draws the two status lines in the strip above the viewport.
pub(crate) fn draw_status(status: &StatusPresentation) {
    draw_rectangle(
        0.0,
        0.0,
        SCREEN_PIXELS,
        STATUS_HEIGHT,
        to_macroquad_color(STATUS_BACKGROUND),
    );
    let text = to_macroquad_color(STATUS_TEXT);
    draw_text(&status.upper, 3.0, 6.0, 8.0, text);
    draw_text(&status.lower, 3.0, 13.0, 8.0, text);
}

/// Draws the modal speech bubble over the viewport.
pub(crate) fn draw_speech(overlay: &SpeechOverlay) {
    let x = 6.0;
    let y = 42.0;
    let width = SCREEN_PIXELS - 12.0;
    let height = 44.0;
    draw_rectangle(x, y, width, height, to_macroquad_color(SPEECH_FILL));
    draw_rectangle_lines(x, y, width, height, 2.0, to_macroquad_color(SPEECH_BORDER));
    let text = to_macroquad_color(SPEECH_TEXT);
    draw_text(overlay.page.top(), x + 5.0, y + 17.0, 10.0, text);
    draw_text(overlay.page.bottom(), x + 5.0, y + 33.0, 10.0, text);
}

/// Draws the closing screen once the door has opened.
pub(crate) fn draw_game_over() {
    draw_rectangle(
        0.0,
        0.0,
        SCREEN_PIXELS,
        SCREEN_PIXELS,
        to_macroquad_color(SPEECH_FILL),
    );
    let text = to_macroquad_color(SPEECH_TEXT);
    draw_text("THE END", 38.0, 58.0, 14.0, text);
    draw_text("you walked free", 26.0, 76.0, 9.0, text);
}
