#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the CaveQuest engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters capture [`ButtonState`]
//! snapshots, the actions system resolves them into [`Command`] values, the
//! world executes those commands via its `apply` entry point, and then
//! broadcasts [`Event`] values describing what changed so adapters can redraw
//! incrementally.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to CaveQuest.";

/// Maximum number of characters displayed per speech-overlay line.
///
/// The overlay mimics a small fixed-width LCD text area; longer lines are
/// truncated at construction so backends never have to wrap.
pub const SPEECH_LINE_CHARS: usize = 17;

/// Identifies one of the fixed set of maps owned by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapId {
    /// The outdoor overworld where the quest begins.
    Overworld,
    /// The smaller cave interior where the enemy waits.
    Lair,
}

impl MapId {
    /// Every map in registry order.
    pub const ALL: [MapId; 2] = [MapId::Overworld, MapId::Lair];

    /// Zero-based registry index of the map.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            MapId::Overworld => 0,
            MapId::Lair => 1,
        }
    }

    /// Human-readable name used by status displays and the debug dump.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MapId::Overworld => "overworld",
            MapId::Lair => "lair",
        }
    }
}

/// Location of a single map cell expressed as signed x/y coordinates.
///
/// Signed coordinates let viewport math step outside the map bounds; the
/// world treats any out-of-range coordinate as holding no tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    x: i32,
    y: i32,
}

impl GridPos {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate one step away in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::North => Self::new(self.x, self.y - 1),
            Direction::South => Self::new(self.x, self.y + 1),
            Direction::East => Self::new(self.x + 1, self.y),
            Direction::West => Self::new(self.x - 1, self.y),
        }
    }

    /// Returns the coordinate offset by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in query order (north, south, east, west).
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

/// Axis along which run placers lay out consecutive tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Tiles advance along increasing x.
    Horizontal,
    /// Tiles advance along increasing y.
    Vertical,
}

/// Which quadrant of the 2x2 cave entrance a tile draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaveCorner {
    /// Upper-left quadrant.
    NorthWest,
    /// Upper-right quadrant.
    NorthEast,
    /// Lower-left quadrant.
    SouthWest,
    /// Lower-right quadrant.
    SouthEast,
}

/// Teleport destination carried by stairs and cave tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Portal {
    map: MapId,
    destination: GridPos,
}

impl Portal {
    /// Creates a portal leading to the provided map and cell.
    #[must_use]
    pub const fn new(map: MapId, destination: GridPos) -> Self {
        Self { map, destination }
    }

    /// Map the portal leads to.
    #[must_use]
    pub const fn map(&self) -> MapId {
        self.map
    }

    /// Cell the player appears at after travelling through the portal.
    #[must_use]
    pub const fn destination(&self) -> GridPos {
        self.destination
    }
}

/// Closed set of tile categories that can occupy a map cell.
///
/// Rendering dispatches by pattern-matching on this enum; there are no stored
/// draw callbacks because the tile set is fixed at design time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Impassable wall segment.
    Wall,
    /// Locked door that ends the game once the key is held.
    Door,
    /// Decorative plant.
    Plant,
    /// Decorative plant with an alternate look.
    AltPlant,
    /// Quest-giving villager.
    Npc,
    /// Water spell pickup.
    Water,
    /// Fire spell pickup.
    Fire,
    /// Earth spell pickup.
    Earth,
    /// The enemy guarding the lair.
    Enemy,
    /// Remains left behind once the enemy has been defeated.
    EnemySlain,
    /// Stairs leading back out of the lair.
    Stairs,
    /// One quadrant of the cave entrance.
    Cave(CaveCorner),
    /// Slow, walkable mud.
    Mud,
    /// Tombstone marking a cell that was occupied and is now intentionally
    /// empty. Distinct from true absence for exactly as long as the redraw
    /// pass needs to paint the cell out.
    Clear,
}

impl TileKind {
    /// Character used when dumping a map as a text grid.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Wall => 'W',
            TileKind::Door => 'D',
            TileKind::Plant => 'P',
            TileKind::AltPlant => 'p',
            TileKind::Npc => 'N',
            TileKind::Water => 'w',
            TileKind::Fire => 'f',
            TileKind::Earth => 'e',
            TileKind::Enemy => 'E',
            TileKind::EnemySlain => 'x',
            TileKind::Stairs => 'S',
            TileKind::Cave(_) => 'C',
            TileKind::Mud => 'M',
            TileKind::Clear => ' ',
        }
    }
}

/// The entity occupying one map cell: category, walkability, and an optional
/// teleport payload.
///
/// A tile owns its payload outright; overwriting a cell drops the previous
/// tile and everything attached to it, so there is a single ownership rule
/// for every placement path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    kind: TileKind,
    walkable: bool,
    portal: Option<Portal>,
}

impl Tile {
    const fn new(kind: TileKind, walkable: bool, portal: Option<Portal>) -> Self {
        Self {
            kind,
            walkable,
            portal,
        }
    }

    /// Impassable wall segment.
    #[must_use]
    pub const fn wall() -> Self {
        Self::new(TileKind::Wall, false, None)
    }

    /// Locked door segment.
    #[must_use]
    pub const fn door() -> Self {
        Self::new(TileKind::Door, false, None)
    }

    /// Decorative plant.
    #[must_use]
    pub const fn plant() -> Self {
        Self::new(TileKind::Plant, true, None)
    }

    /// Decorative plant with an alternate look.
    #[must_use]
    pub const fn alt_plant() -> Self {
        Self::new(TileKind::AltPlant, true, None)
    }

    /// Quest-giving villager. Blocks movement so the player talks instead of
    /// walking through.
    #[must_use]
    pub const fn npc() -> Self {
        Self::new(TileKind::Npc, false, None)
    }

    /// Water spell pickup.
    #[must_use]
    pub const fn water() -> Self {
        Self::new(TileKind::Water, true, None)
    }

    /// Fire spell pickup.
    #[must_use]
    pub const fn fire() -> Self {
        Self::new(TileKind::Fire, true, None)
    }

    /// Earth spell pickup.
    #[must_use]
    pub const fn earth() -> Self {
        Self::new(TileKind::Earth, true, None)
    }

    /// The enemy guarding the lair. Walkable so the player can stand adjacent
    /// and cast from a spell cell.
    #[must_use]
    pub const fn enemy() -> Self {
        Self::new(TileKind::Enemy, true, None)
    }

    /// Remains of the defeated enemy.
    #[must_use]
    pub const fn enemy_slain() -> Self {
        Self::new(TileKind::EnemySlain, true, None)
    }

    /// Stairs carrying a portal back to the destination map.
    #[must_use]
    pub const fn stairs(portal: Portal) -> Self {
        Self::new(TileKind::Stairs, true, Some(portal))
    }

    /// One quadrant of the cave entrance, carrying the portal into the lair.
    #[must_use]
    pub const fn cave(corner: CaveCorner, portal: Portal) -> Self {
        Self::new(TileKind::Cave(corner), true, Some(portal))
    }

    /// Slow, walkable mud.
    #[must_use]
    pub const fn mud() -> Self {
        Self::new(TileKind::Mud, true, None)
    }

    /// The clear tombstone: reads as intentionally empty ground.
    #[must_use]
    pub const fn clear() -> Self {
        Self::new(TileKind::Clear, true, None)
    }

    /// Category of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Whether the player may step onto this tile.
    #[must_use]
    pub const fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// Teleport payload, present only on stairs and cave tiles.
    #[must_use]
    pub const fn portal(&self) -> Option<Portal> {
        self.portal
    }

    /// Character used when dumping a map as a text grid.
    #[must_use]
    pub const fn glyph(&self) -> char {
        self.kind.glyph()
    }
}

/// Raw input snapshot captured by an adapter once per frame.
///
/// Mirrors the physical controls: two push buttons plus a four-way
/// navigation switch with a centre press. Adapters make no debouncing
/// promises beyond "at most one resolved action per frame".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonState {
    /// Action/confirm button.
    pub action: bool,
    /// Menu button (currently reserved).
    pub menu: bool,
    /// Navigation switch pushed up.
    pub up: bool,
    /// Navigation switch pushed down.
    pub down: bool,
    /// Navigation switch pushed left.
    pub left: bool,
    /// Navigation switch pushed right.
    pub right: bool,
    /// Navigation switch pressed in.
    pub center: bool,
}

/// One two-line page of dialogue shown in the speech overlay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechPage {
    top: String,
    bottom: String,
}

impl SpeechPage {
    /// Creates a page, truncating each line to [`SPEECH_LINE_CHARS`].
    #[must_use]
    pub fn new(top: &str, bottom: &str) -> Self {
        Self {
            top: truncate_line(top),
            bottom: truncate_line(bottom),
        }
    }

    /// First line of the page.
    #[must_use]
    pub fn top(&self) -> &str {
        &self.top
    }

    /// Second line of the page.
    #[must_use]
    pub fn bottom(&self) -> &str {
        &self.bottom
    }
}

fn truncate_line(line: &str) -> String {
    line.chars().take(SPEECH_LINE_CHARS).collect()
}

/// Commands that express all permissible world mutations.
///
/// At most one command is resolved per frame from the input snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Requests that the player advance a single step in the direction.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Presses the action button: talk, open, enter, climb or cast
    /// depending on what is here or adjacent.
    Interact,
    /// Toggles free-roam mode, which lets the player ignore walkability.
    ToggleFreeRoam,
}

/// Events broadcast by the world after processing a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: GridPos,
        /// Cell the player occupies after the move.
        to: GridPos,
    },
    /// Reports that a step was rejected by a non-walkable tile.
    MoveBlocked {
        /// Direction of the attempted step.
        direction: Direction,
        /// Category of the tile that blocked it.
        kind: TileKind,
    },
    /// Announces that free-roam mode was toggled.
    FreeRoamToggled {
        /// Whether free-roam is now active.
        enabled: bool,
    },
    /// Requests that the adapter display a modal dialogue sequence.
    SpeechRequested {
        /// Pages shown one at a time, each confirmed by the action button.
        pages: Vec<SpeechPage>,
    },
    /// Announces that the active map changed and the player was teleported.
    MapChanged {
        /// Map that became active.
        map: MapId,
        /// Cell the player appears at on the new map.
        spawn: GridPos,
    },
    /// The player received the key that opens the door.
    KeyGranted,
    /// The enemy was defeated.
    EnemySlain {
        /// Cell where the remains were placed.
        pos: GridPos,
    },
    /// The door opened; the game is over.
    GameWon,
    /// State changed in a way that invalidates every visible cell; adapters
    /// should repaint the whole viewport instead of diffing.
    SceneInvalidated,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tile_round_trips_through_bincode() {
        let portal = Portal::new(MapId::Lair, GridPos::new(8, 14));
        assert_round_trip(&Tile::cave(CaveCorner::NorthWest, portal));
        assert_round_trip(&Tile::wall());
    }

    #[test]
    fn command_round_trips_through_bincode() {
        assert_round_trip(&Command::Move {
            direction: Direction::West,
        });
        assert_round_trip(&Command::Interact);
    }

    #[test]
    fn event_round_trips_through_bincode() {
        assert_round_trip(&Event::SpeechRequested {
            pages: vec![SpeechPage::new("Traveller! Please", "hear an old plea.")],
        });
        assert_round_trip(&Event::MapChanged {
            map: MapId::Lair,
            spawn: GridPos::new(8, 14),
        });
    }

    #[test]
    fn step_moves_one_cell_in_each_direction() {
        let origin = GridPos::new(3, 7);
        assert_eq!(origin.step(Direction::North), GridPos::new(3, 6));
        assert_eq!(origin.step(Direction::South), GridPos::new(3, 8));
        assert_eq!(origin.step(Direction::East), GridPos::new(4, 7));
        assert_eq!(origin.step(Direction::West), GridPos::new(2, 7));
    }

    #[test]
    fn walkability_matches_tile_category() {
        assert!(!Tile::wall().is_walkable());
        assert!(!Tile::door().is_walkable());
        assert!(!Tile::npc().is_walkable());
        assert!(Tile::plant().is_walkable());
        assert!(Tile::mud().is_walkable());
        assert!(Tile::clear().is_walkable());
        assert!(Tile::enemy().is_walkable());
    }

    #[test]
    fn portal_payload_only_on_teleporting_tiles() {
        let portal = Portal::new(MapId::Overworld, GridPos::new(5, 5));
        assert_eq!(Tile::stairs(portal).portal(), Some(portal));
        assert_eq!(
            Tile::cave(CaveCorner::SouthEast, portal).portal(),
            Some(portal)
        );
        assert_eq!(Tile::wall().portal(), None);
        assert_eq!(Tile::water().portal(), None);
    }

    #[test]
    fn speech_page_truncates_to_line_width() {
        let page = SpeechPage::new("This line is far too long for the overlay", "ok");
        assert_eq!(page.top().chars().count(), SPEECH_LINE_CHARS);
        assert_eq!(page.bottom(), "ok");
    }

    #[test]
    fn glyphs_are_distinct_per_kind() {
        let kinds = [
            TileKind::Wall,
            TileKind::Door,
            TileKind::Plant,
            TileKind::AltPlant,
            TileKind::Npc,
            TileKind::Water,
            TileKind::Fire,
            TileKind::Earth,
            TileKind::Enemy,
            TileKind::EnemySlain,
            TileKind::Stairs,
            TileKind::Cave(CaveCorner::NorthWest),
            TileKind::Mud,
            TileKind::Clear,
        ];
        for (index, kind) in kinds.iter().enumerate() {
            for other in &kinds[index + 1..] {
                assert_ne!(kind.glyph(), other.glyph(), "{kind:?} vs {other:?}");
            }
        }
    }
}
