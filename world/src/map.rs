//! Sparse tile maps layered on the bucketed store.
//!
//! A map stores only the cells that hold something; everything else is true
//! absence. Erasure never shrinks a chain mid-gameplay: the erased cell keeps
//! its key and holds a clear tombstone so the redraw pass can paint the cell
//! out, and reads normalize the tombstone so repeated reads stay clear.

use cavequest_core::{CaveCorner, Direction, GridPos, MapId, Orientation, Portal, Tile, TileKind};

use crate::store::BucketStore;

/// Bucket count shared by every map. Prime, so the row-major key encoding
/// spreads evenly across chains.
pub const MAP_BUCKETS: usize = 97;

fn map_hash(key: u32) -> u32 {
    key % MAP_BUCKETS as u32
}

/// One sparse map: a bucketed tile store plus fixed dimensions.
///
/// All coordinate-keyed operations take the map explicitly; keys are encoded
/// with this map's own height, so keys computed against different maps can
/// never be mixed.
#[derive(Debug)]
pub struct GridMap {
    id: MapId,
    width: u32,
    height: u32,
    tiles: BucketStore<Tile>,
}

impl GridMap {
    /// Creates an empty map with the provided dimensions.
    #[must_use]
    pub fn new(id: MapId, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            tiles: BucketStore::new(map_hash, MAP_BUCKETS),
        }
    }

    /// Identifier of this map within the registry.
    #[must_use]
    pub const fn id(&self) -> MapId {
        self.id
    }

    /// Width of the map in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the map in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Whether the coordinate lies inside the map bounds.
    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x() >= 0
            && pos.y() >= 0
            && pos.x() < self.width as i32
            && pos.y() < self.height as i32
    }

    /// Row-major key for an in-bounds coordinate: `x * height + y`.
    ///
    /// Injective because `0 <= y < height` holds for every in-bounds cell.
    fn cell_key(&self, pos: GridPos) -> Option<u32> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.x() as u32 * self.height + pos.y() as u32)
    }

    /// Number of cells currently holding an entry (tombstones included).
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.tiles.len()
    }

    /// Reads the tile at a coordinate without normalizing tombstones.
    ///
    /// Used by read-only consumers (queries, the debug dump, scene
    /// sampling); a clear tombstone is reported as the clear tile, which is
    /// externally indistinguishable from the normalized read.
    #[must_use]
    pub fn peek(&self, pos: GridPos) -> Option<Tile> {
        let key = self.cell_key(pos)?;
        self.tiles.get(key).copied()
    }

    /// Reads the tile at a coordinate, normalizing a clear tombstone by
    /// overwriting it with a fresh clear tile.
    ///
    /// The caller observes "this cell reads as intentionally empty"; repeated
    /// reads keep answering the clear tile, never absence.
    pub fn here(&mut self, pos: GridPos) -> Option<Tile> {
        let key = self.cell_key(pos)?;
        let tile = self.tiles.get(key).copied()?;
        if tile.kind() == TileKind::Clear {
            let _previous = self.tiles.insert(key, Tile::clear());
        }
        Some(tile)
    }

    /// Tile one step north of the coordinate.
    pub fn north(&mut self, pos: GridPos) -> Option<Tile> {
        self.here(pos.step(Direction::North))
    }

    /// Tile one step south of the coordinate.
    pub fn south(&mut self, pos: GridPos) -> Option<Tile> {
        self.here(pos.step(Direction::South))
    }

    /// Tile one step east of the coordinate.
    pub fn east(&mut self, pos: GridPos) -> Option<Tile> {
        self.here(pos.step(Direction::East))
    }

    /// Tile one step west of the coordinate.
    pub fn west(&mut self, pos: GridPos) -> Option<Tile> {
        self.here(pos.step(Direction::West))
    }

    /// Tile one step away in the provided direction.
    pub fn neighbor(&mut self, pos: GridPos, direction: Direction) -> Option<Tile> {
        self.here(pos.step(direction))
    }

    /// Replaces whatever occupies the coordinate with a clear tombstone.
    ///
    /// The key is kept so the redraw pass can see "something used to be
    /// here, now draw nothing"; the previous tile and its payload are
    /// dropped together.
    pub fn erase(&mut self, pos: GridPos) {
        self.place(pos, Tile::clear());
    }

    fn place(&mut self, pos: GridPos, tile: Tile) {
        let Some(key) = self.cell_key(pos) else {
            log::warn!(
                "ignoring placement of {:?} outside {} map at ({}, {})",
                tile.kind(),
                self.id.name(),
                pos.x(),
                pos.y()
            );
            return;
        };
        // The previous occupant (tile and payload alike) drops here.
        let _previous = self.tiles.insert(key, tile);
    }

    fn place_run(&mut self, tile: Tile, origin: GridPos, orientation: Orientation, len: u32) {
        for step in 0..len as i32 {
            let pos = match orientation {
                Orientation::Horizontal => origin.offset(step, 0),
                Orientation::Vertical => origin.offset(0, step),
            };
            self.place(pos, tile);
        }
    }

    /// Places a run of wall segments.
    pub fn place_wall(&mut self, origin: GridPos, orientation: Orientation, len: u32) {
        self.place_run(Tile::wall(), origin, orientation, len);
    }

    /// Places a run of door segments.
    pub fn place_door(&mut self, origin: GridPos, orientation: Orientation, len: u32) {
        self.place_run(Tile::door(), origin, orientation, len);
    }

    /// Places a run of mud.
    pub fn place_mud(&mut self, origin: GridPos, orientation: Orientation, len: u32) {
        self.place_run(Tile::mud(), origin, orientation, len);
    }

    /// Places a decorative plant.
    pub fn place_plant(&mut self, pos: GridPos) {
        self.place(pos, Tile::plant());
    }

    /// Places the alternate plant variant.
    pub fn place_alt_plant(&mut self, pos: GridPos) {
        self.place(pos, Tile::alt_plant());
    }

    /// Places the quest-giving villager.
    pub fn place_npc(&mut self, pos: GridPos) {
        self.place(pos, Tile::npc());
    }

    /// Places the water spell pickup.
    pub fn place_water(&mut self, pos: GridPos) {
        self.place(pos, Tile::water());
    }

    /// Places the fire spell pickup.
    pub fn place_fire(&mut self, pos: GridPos) {
        self.place(pos, Tile::fire());
    }

    /// Places the earth spell pickup.
    pub fn place_earth(&mut self, pos: GridPos) {
        self.place(pos, Tile::earth());
    }

    /// Places the enemy.
    pub fn place_enemy(&mut self, pos: GridPos) {
        self.place(pos, Tile::enemy());
    }

    /// Places the defeated enemy's remains.
    pub fn place_enemy_slain(&mut self, pos: GridPos) {
        self.place(pos, Tile::enemy_slain());
    }

    /// Places stairs carrying the provided portal.
    pub fn place_stairs(&mut self, pos: GridPos, portal: Portal) {
        self.place(pos, Tile::stairs(portal));
    }

    /// Places one quadrant of a cave entrance carrying the provided portal.
    pub fn place_cave(&mut self, pos: GridPos, corner: CaveCorner, portal: Portal) {
        self.place(pos, Tile::cave(corner, portal));
    }

    /// Renders the map as a character grid, one glyph per cell, for
    /// terminal inspection.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut grid = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let glyph = self
                    .peek(GridPos::new(x, y))
                    .map_or(' ', |tile| tile.glyph());
                grid.push(glyph);
            }
            grid.push('\n');
        }
        grid
    }
}
