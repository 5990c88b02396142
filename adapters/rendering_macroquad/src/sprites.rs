//! Procedural tile and avatar drawing.
//!
//! Every tile is drawn from shape primitives; there is no texture atlas
//! because the visual language is a handful of flat-colored glyphs on an
//! 11-pixel grid. Coordinates are logical pixels inside the offscreen
//! target, never scaled window pixels. Positions are carried as `glam`
//! vectors and converted to macroquad's vector type at the draw call.

use cavequest_core::{CaveCorner, TileKind};
use cavequest_rendering::{
    cell_origin, CellPaint, Color, PlayerPresentation, SceneCell, TILE_PIXELS,
};
use glam::Vec2;
use macroquad::{
    math::vec2,
    shapes::{draw_circle, draw_line, draw_rectangle, draw_triangle},
};

use crate::to_macroquad_color;

pub(crate) const GROUND: Color = Color::from_rgb_u8(156, 189, 15);
const WALL: Color = Color::from_rgb_u8(48, 98, 48);
const DOOR: Color = Color::from_rgb_u8(116, 82, 30);
const DOOR_FRAME: Color = Color::from_rgb_u8(66, 46, 14);
const PLANT: Color = Color::from_rgb_u8(72, 128, 40);
const NPC_BODY: Color = Color::from_rgb_u8(60, 70, 160);
const NPC_HEAD: Color = Color::from_rgb_u8(228, 190, 150);
const WATER: Color = Color::from_rgb_u8(60, 110, 220);
const FIRE: Color = Color::from_rgb_u8(220, 90, 30);
const EARTH: Color = Color::from_rgb_u8(130, 94, 50);
const ENEMY: Color = Color::from_rgb_u8(150, 30, 40);
const REMAINS: Color = Color::from_rgb_u8(90, 90, 90);
const STAIRS: Color = Color::from_rgb_u8(70, 70, 70);
const CAVE_MOUTH: Color = Color::from_rgb_u8(20, 20, 20);
const MUD: Color = Color::from_rgb_u8(98, 72, 38);
const PLAYER: Color = Color::from_rgb_u8(240, 240, 240);
const PLAYER_WITH_KEY: Color = Color::from_rgb_u8(235, 200, 60);

/// Centre of the cell whose upper-left corner is `origin`.
fn cell_centre(origin: Vec2) -> Vec2 {
    origin + Vec2::splat(TILE_PIXELS / 2.0)
}

fn to_macroquad_vec2(point: Vec2) -> macroquad::math::Vec2 {
    vec2(point.x, point.y)
}

fn fill_cell(origin: Vec2, color: Color) {
    draw_rectangle(
        origin.x,
        origin.y,
        TILE_PIXELS,
        TILE_PIXELS,
        to_macroquad_color(color),
    );
}

/// Repaints one viewport cell from scratch.
pub(crate) fn paint_cell(cell: &SceneCell) {
    match cell.paint {
        CellPaint::OutOfBounds | CellPaint::Tile(TileKind::Wall) => fill_cell(cell.origin, WALL),
        CellPaint::Background | CellPaint::Tile(TileKind::Clear) => fill_cell(cell.origin, GROUND),
        CellPaint::Tile(kind) => {
            fill_cell(cell.origin, GROUND);
            draw_tile(kind, cell.origin);
        }
    }
}

fn draw_tile(kind: TileKind, origin: Vec2) {
    let Vec2 { x, y } = origin;
    let centre = cell_centre(origin);
    match kind {
        TileKind::Door => {
            fill_cell(origin, DOOR_FRAME);
            draw_rectangle(
                x + 2.0,
                y + 1.0,
                TILE_PIXELS - 4.0,
                TILE_PIXELS - 1.0,
                to_macroquad_color(DOOR),
            );
            draw_circle(centre.x, centre.y + 1.0, 1.0, to_macroquad_color(DOOR_FRAME));
        }
        TileKind::Plant => {
            draw_circle(centre.x, centre.y, 3.5, to_macroquad_color(PLANT));
        }
        TileKind::AltPlant => {
            draw_circle(centre.x, centre.y, 3.5, to_macroquad_color(PLANT.lighten(0.35)));
        }
        TileKind::Npc => {
            draw_rectangle(x + 3.0, y + 5.0, 5.0, 5.0, to_macroquad_color(NPC_BODY));
            draw_circle(centre.x, y + 3.5, 2.5, to_macroquad_color(NPC_HEAD));
        }
        TileKind::Water => {
            draw_circle(centre.x, centre.y, 3.0, to_macroquad_color(WATER));
        }
        TileKind::Fire => {
            draw_circle(centre.x, centre.y, 3.0, to_macroquad_color(FIRE));
        }
        TileKind::Earth => {
            draw_circle(centre.x, centre.y, 3.0, to_macroquad_color(EARTH));
        }
        TileKind::Enemy => {
            draw_circle(centre.x, centre.y, 4.5, to_macroquad_color(ENEMY));
            draw_circle(
                centre.x - 1.5,
                centre.y - 1.0,
                0.8,
                to_macroquad_color(CAVE_MOUTH),
            );
            draw_circle(
                centre.x + 1.5,
                centre.y - 1.0,
                0.8,
                to_macroquad_color(CAVE_MOUTH),
            );
        }
        TileKind::EnemySlain => {
            let color = to_macroquad_color(REMAINS);
            draw_line(x + 2.0, y + 2.0, x + 9.0, y + 9.0, 1.5, color);
            draw_line(x + 9.0, y + 2.0, x + 2.0, y + 9.0, 1.5, color);
        }
        TileKind::Stairs => {
            let color = to_macroquad_color(STAIRS);
            draw_rectangle(x + 1.0, y + 2.0, 9.0, 2.0, color);
            draw_rectangle(x + 1.0, y + 5.0, 9.0, 2.0, color);
            draw_rectangle(x + 1.0, y + 8.0, 9.0, 2.0, color);
        }
        TileKind::Cave(corner) => draw_cave_quadrant(corner, origin),
        TileKind::Mud => {
            draw_rectangle(
                x + 1.0,
                y + 1.0,
                TILE_PIXELS - 2.0,
                TILE_PIXELS - 2.0,
                to_macroquad_color(MUD),
            );
        }
        TileKind::Wall | TileKind::Clear => {}
    }
}

/// Each quadrant draws a quarter of the cave mouth so the four tiles form
/// one arched opening.
fn draw_cave_quadrant(corner: CaveCorner, origin: Vec2) {
    let color = to_macroquad_color(CAVE_MOUTH);
    let size = Vec2::splat(TILE_PIXELS);
    fill_cell(origin, EARTH);
    let north_west = origin;
    let north_east = origin + Vec2::new(size.x, 0.0);
    let south_west = origin + Vec2::new(0.0, size.y);
    let south_east = origin + size;
    let (a, b, c) = match corner {
        CaveCorner::NorthWest => (north_east, south_east, south_west),
        CaveCorner::NorthEast => (north_west, south_east, south_west),
        CaveCorner::SouthWest => (north_west, north_east, south_east),
        CaveCorner::SouthEast => (north_west, north_east, south_west),
    };
    draw_triangle(
        to_macroquad_vec2(a),
        to_macroquad_vec2(b),
        to_macroquad_vec2(c),
        color,
    );
}

/// Draws the avatar over the centre viewport cell.
pub(crate) fn paint_player(player: &PlayerPresentation) {
    let centre = cell_centre(cell_origin(
        cavequest_rendering::VIEW_COLUMNS / 2,
        cavequest_rendering::VIEW_ROWS / 2,
    ));
    let color = if player.has_key {
        PLAYER_WITH_KEY
    } else {
        PLAYER
    };
    draw_circle(centre.x, centre.y, 4.0, to_macroquad_color(color));
    draw_circle(
        centre.x - 1.5,
        centre.y - 1.0,
        0.7,
        to_macroquad_color(CAVE_MOUTH),
    );
    draw_circle(
        centre.x + 1.5,
        centre.y - 1.0,
        0.7,
        to_macroquad_color(CAVE_MOUTH),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_centre_sits_half_a_tile_inside_the_origin() {
        assert_eq!(cell_centre(cell_origin(0, 0)), Vec2::new(8.5, 20.5));
        assert_eq!(cell_centre(cell_origin(10, 8)), Vec2::new(118.5, 108.5));
    }

    #[test]
    fn vector_conversion_preserves_components() {
        let converted = to_macroquad_vec2(Vec2::new(3.0, 15.0));
        assert_eq!(converted.x, 3.0);
        assert_eq!(converted.y, 15.0);
    }
}
