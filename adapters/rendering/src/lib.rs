#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for CaveQuest adapters.
//!
//! The scene is a fixed grid of viewport cells centred on the player. Each
//! refresh samples the world through a tile lookup and marks only the cells
//! whose paint changed as dirty, so backends repaint a handful of cells per
//! frame instead of the whole screen.

use anyhow::Result as AnyResult;
use cavequest_core::{ButtonState, GridPos, SpeechPage, Tile, TileKind};
use glam::Vec2;
use std::time::Duration;

/// Number of viewport columns.
pub const VIEW_COLUMNS: i32 = 11;
/// Number of viewport rows.
pub const VIEW_ROWS: i32 = 9;
/// Side length of one viewport cell in logical pixels.
pub const TILE_PIXELS: f32 = 11.0;
/// Upper-left corner of the viewport in logical pixels.
pub const VIEW_ORIGIN: Vec2 = Vec2::new(3.0, 15.0);
/// Side length of the logical screen in pixels.
pub const SCREEN_PIXELS: f32 = 128.0;

/// Columns visible west of the player.
const WEST_SPAN: i32 = VIEW_COLUMNS / 2;
/// Rows visible north of the player.
const NORTH_SPAN: i32 = VIEW_ROWS / 2;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// What a single viewport cell should display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellPaint {
    /// A stored tile of the given kind.
    Tile(TileKind),
    /// In-bounds ground with nothing stored on it.
    Background,
    /// A cell beyond the edge of the active map.
    OutOfBounds,
}

/// One cell of the viewport grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCell {
    /// Upper-left pixel corner of the cell on screen.
    pub origin: Vec2,
    /// What the cell currently displays.
    pub paint: CellPaint,
    /// Whether the backend must repaint the cell this frame.
    pub dirty: bool,
}

/// Player state a backend needs to draw the avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerPresentation {
    /// Cell the player occupies; the viewport is centred here.
    pub pos: GridPos,
    /// Cell the player occupied on the previous frame.
    pub prev_pos: GridPos,
    /// Whether the key is held, which changes the avatar's look.
    pub has_key: bool,
}

/// Two status lines drawn outside the viewport.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StatusPresentation {
    /// First status line.
    pub upper: String,
    /// Second status line.
    pub lower: String,
}

/// Modal dialogue overlay covering the viewport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechOverlay {
    /// Page currently displayed.
    pub page: SpeechPage,
}

/// Scene description maintained by the adapter and consumed by backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Viewport cells in row-major order, [`VIEW_COLUMNS`] per row.
    pub cells: Vec<SceneCell>,
    /// Player avatar state.
    pub player: PlayerPresentation,
    /// Status lines drawn above the viewport.
    pub status: StatusPresentation,
    /// Active dialogue overlay, if any. While present the backend draws the
    /// overlay instead of the viewport cells.
    pub speech: Option<SpeechOverlay>,
    /// Whether the game has been won; backends switch to the closing screen.
    pub game_over: bool,
}

impl Scene {
    /// Creates a scene with every cell blank and marked dirty.
    #[must_use]
    pub fn new(player: PlayerPresentation, status: StatusPresentation) -> Self {
        let mut cells = Vec::with_capacity((VIEW_COLUMNS * VIEW_ROWS) as usize);
        for row in 0..VIEW_ROWS {
            for column in 0..VIEW_COLUMNS {
                cells.push(SceneCell {
                    origin: cell_origin(column, row),
                    paint: CellPaint::Background,
                    dirty: true,
                });
            }
        }
        Self {
            cells,
            player,
            status,
            speech: None,
            game_over: false,
        }
    }

    /// Re-samples every viewport cell around the player.
    ///
    /// A cell is marked dirty when its paint changed, when `full` is set, or
    /// when it displays a clear tombstone; tombstones repaint every frame so
    /// an erased tile disappears even while the player stands still. The
    /// player's own cell is always dirty because the avatar is drawn over it.
    /// Dirty flags accumulate until the backend repaints and clears them.
    pub fn refresh<F>(
        &mut self,
        player: PlayerPresentation,
        map_size: (u32, u32),
        mut tile_at: F,
        full: bool,
    ) where
        F: FnMut(GridPos) -> Option<Tile>,
    {
        let (width, height) = map_size;
        for row in 0..VIEW_ROWS {
            for column in 0..VIEW_COLUMNS {
                let dx = column - WEST_SPAN;
                let dy = row - NORTH_SPAN;
                let pos = player.pos.offset(dx, dy);
                let in_bounds = pos.x() >= 0
                    && pos.y() >= 0
                    && pos.x() < width as i32
                    && pos.y() < height as i32;

                let paint = if !in_bounds {
                    CellPaint::OutOfBounds
                } else {
                    match tile_at(pos) {
                        Some(tile) => CellPaint::Tile(tile.kind()),
                        None => CellPaint::Background,
                    }
                };

                let index = (row * VIEW_COLUMNS + column) as usize;
                let cell = &mut self.cells[index];
                let dirty = full
                    || paint != cell.paint
                    || paint == CellPaint::Tile(TileKind::Clear)
                    || (dx == 0 && dy == 0);
                cell.paint = paint;
                cell.dirty = cell.dirty || dirty;
            }
        }
        self.player = player;
    }

    /// Marks every cell dirty so the next paint covers the whole viewport.
    pub fn invalidate(&mut self) {
        for cell in &mut self.cells {
            cell.dirty = true;
        }
    }

    /// Clears every dirty flag; called by backends after painting.
    pub fn mark_painted(&mut self) {
        for cell in &mut self.cells {
            cell.dirty = false;
        }
    }
}

/// Pixel origin of the viewport cell at the given column and row.
#[must_use]
pub fn cell_origin(column: i32, row: i32) -> Vec2 {
    Vec2::new(
        column as f32 * TILE_PIXELS + VIEW_ORIGIN.x,
        row as f32 * TILE_PIXELS + VIEW_ORIGIN.y,
    )
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting CaveQuest scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// button snapshot captured by the backend, and may mutate the scene
    /// before it is painted.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, ButtonState, &mut Scene) + 'static;
}

/// Short sound effects the adapter may request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    /// A dialogue page was presented.
    Speech,
    /// The enemy was defeated.
    EnemySlain,
    /// The door opened and the game was won.
    Victory,
}

/// Destination for sound cues.
pub trait AudioSink {
    /// Plays a cue. Implementations may drop cues they cannot honor.
    fn play(&mut self, cue: SoundCue);
}

/// Audio sink that logs cues instead of playing them.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("audio cue {cue:?}");
    }
}
