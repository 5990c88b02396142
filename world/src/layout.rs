//! Fixed construction of the shipped maps.
//!
//! Both maps are built exactly once at world construction and never resized
//! or torn down afterwards. Placement order matters on the overworld: the
//! plant field is seeded first so the border walls overwrite any plant that
//! landed on the perimeter.

use cavequest_core::{CaveCorner, GridPos, MapId, Orientation, Portal};

use crate::map::GridMap;

pub(crate) const OVERWORLD_SIZE: u32 = 50;
pub(crate) const LAIR_SIZE: u32 = 16;

/// Where the player first appears, and where the lair stairs lead back to.
pub(crate) const OVERWORLD_SPAWN: GridPos = GridPos::new(5, 5);
/// Upper-left quadrant of the 2x2 cave entrance.
pub(crate) const CAVE_ORIGIN: GridPos = GridPos::new(5, 20);
/// Where the cave portal drops the player inside the lair.
pub(crate) const LAIR_SPAWN: GridPos = GridPos::new(8, 14);
/// Where the enemy waits, and where its remains are placed once defeated.
pub(crate) const LAIR_ENEMY_POS: GridPos = GridPos::new(8, 8);
/// The quest-giving villager's cell.
pub(crate) const NPC_POS: GridPos = GridPos::new(10, 5);
/// Westernmost segment of the chamber door; the run extends east.
pub(crate) const DOOR_ORIGIN: GridPos = GridPos::new(33, 10);
/// Number of door segments in the chamber wall.
pub(crate) const DOOR_SPAN: u32 = 4;

const PLANT_STRIDE: i32 = 39;

pub(crate) fn build_overworld(map: &mut GridMap) {
    let width = map.width() as i32;
    let height = map.height() as i32;
    let area = width * height;

    log::debug!("seeding overworld plant field");
    let mut index = width + 3;
    while index < area {
        map.place_plant(GridPos::new(index % width, index / width));
        index += PLANT_STRIDE;
    }
    let mut index = width + 7;
    while index < area {
        map.place_alt_plant(GridPos::new(index % width, index / width));
        index += PLANT_STRIDE;
    }

    log::debug!("raising overworld border walls");
    map.place_wall(GridPos::new(0, 0), Orientation::Horizontal, width as u32);
    map.place_wall(
        GridPos::new(0, height - 1),
        Orientation::Horizontal,
        width as u32,
    );
    map.place_wall(GridPos::new(0, 0), Orientation::Vertical, height as u32);
    map.place_wall(
        GridPos::new(width - 1, 0),
        Orientation::Vertical,
        height as u32,
    );

    log::debug!("walling off the door chamber");
    map.place_wall(GridPos::new(30, 0), Orientation::Vertical, 10);
    map.place_wall(GridPos::new(30, 10), Orientation::Horizontal, 10);
    map.place_wall(GridPos::new(39, 0), Orientation::Vertical, 10);
    map.place_door(DOOR_ORIGIN, Orientation::Horizontal, DOOR_SPAN);

    log::debug!("digging the cave entrance");
    let into_lair = Portal::new(MapId::Lair, LAIR_SPAWN);
    map.place_cave(CAVE_ORIGIN, CaveCorner::NorthWest, into_lair);
    map.place_cave(CAVE_ORIGIN.offset(1, 0), CaveCorner::NorthEast, into_lair);
    map.place_cave(CAVE_ORIGIN.offset(0, 1), CaveCorner::SouthWest, into_lair);
    map.place_cave(CAVE_ORIGIN.offset(1, 1), CaveCorner::SouthEast, into_lair);
    map.place_mud(GridPos::new(3, 18), Orientation::Horizontal, 4);

    map.place_npc(NPC_POS);
}

pub(crate) fn build_lair(map: &mut GridMap) {
    let side = map.width() as i32;

    log::debug!("raising lair border walls");
    map.place_wall(GridPos::new(0, 0), Orientation::Horizontal, side as u32);
    map.place_wall(
        GridPos::new(0, side - 1),
        Orientation::Horizontal,
        side as u32,
    );
    map.place_wall(GridPos::new(0, 0), Orientation::Vertical, side as u32);
    map.place_wall(GridPos::new(side - 1, 0), Orientation::Vertical, side as u32);

    log::debug!("laying out the spells");
    map.place_water(GridPos::new(4, 8));
    map.place_fire(GridPos::new(12, 8));
    map.place_earth(GridPos::new(8, 12));

    map.place_enemy(LAIR_ENEMY_POS);

    let back_out = Portal::new(MapId::Overworld, OVERWORLD_SPAWN);
    map.place_stairs(GridPos::new(4, 6), back_out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavequest_core::TileKind;

    #[test]
    fn overworld_border_is_walled() {
        let mut map = GridMap::new(MapId::Overworld, OVERWORLD_SIZE, OVERWORLD_SIZE);
        build_overworld(&mut map);
        let edge = OVERWORLD_SIZE as i32 - 1;
        for step in 0..OVERWORLD_SIZE as i32 {
            for pos in [
                GridPos::new(step, 0),
                GridPos::new(step, edge),
                GridPos::new(0, step),
                GridPos::new(edge, step),
            ] {
                assert_eq!(
                    map.peek(pos).map(|tile| tile.kind()),
                    Some(TileKind::Wall),
                    "expected wall at ({}, {})",
                    pos.x(),
                    pos.y()
                );
            }
        }
    }

    #[test]
    fn cave_quadrants_share_one_portal() {
        let mut map = GridMap::new(MapId::Overworld, OVERWORLD_SIZE, OVERWORLD_SIZE);
        build_overworld(&mut map);
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let tile = map.peek(CAVE_ORIGIN.offset(dx, dy)).expect("cave tile");
            assert!(matches!(tile.kind(), TileKind::Cave(_)));
            assert_eq!(tile.portal(), Some(Portal::new(MapId::Lair, LAIR_SPAWN)));
        }
    }

    #[test]
    fn lair_holds_spells_enemy_and_stairs() {
        let mut map = GridMap::new(MapId::Lair, LAIR_SIZE, LAIR_SIZE);
        build_lair(&mut map);
        assert_eq!(
            map.peek(GridPos::new(4, 8)).map(|tile| tile.kind()),
            Some(TileKind::Water)
        );
        assert_eq!(
            map.peek(GridPos::new(12, 8)).map(|tile| tile.kind()),
            Some(TileKind::Fire)
        );
        assert_eq!(
            map.peek(GridPos::new(8, 12)).map(|tile| tile.kind()),
            Some(TileKind::Earth)
        );
        assert_eq!(
            map.peek(LAIR_ENEMY_POS).map(|tile| tile.kind()),
            Some(TileKind::Enemy)
        );
        let stairs = map.peek(GridPos::new(4, 6)).expect("stairs");
        assert_eq!(stairs.kind(), TileKind::Stairs);
        assert_eq!(
            stairs.portal(),
            Some(Portal::new(MapId::Overworld, OVERWORLD_SPAWN))
        );
    }
}
