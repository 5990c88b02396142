#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for CaveQuest.
//!
//! The world owns the two sparse maps, the player, and the quest flags. All
//! mutation flows through [`apply`], which consumes a [`Command`] and pushes
//! [`Event`] values describing what changed; adapters and systems read state
//! back through the [`query`] module.

use cavequest_core::{
    Command, Direction, Event, GridPos, MapId, Portal, SpeechPage, TileKind, WELCOME_BANNER,
};

pub mod map;
pub mod store;

mod layout;

pub use map::GridMap;

/// The adventurer: position, quest flags, and movement mode.
///
/// Fields are mutated exclusively by [`apply`]; everything else observes the
/// player through [`query::player`].
#[derive(Debug)]
pub struct Player {
    pos: GridPos,
    prev_pos: GridPos,
    has_key: bool,
    solved: bool,
    talked_to_npc: bool,
    slain_enemy: bool,
    free_roam: bool,
}

impl Player {
    fn new(spawn: GridPos) -> Self {
        Self {
            pos: spawn,
            prev_pos: spawn,
            has_key: false,
            solved: false,
            talked_to_npc: false,
            slain_enemy: false,
            free_roam: false,
        }
    }

    /// Cell the player currently occupies.
    #[must_use]
    pub const fn pos(&self) -> GridPos {
        self.pos
    }

    /// Cell the player occupied before the most recent command.
    #[must_use]
    pub const fn prev_pos(&self) -> GridPos {
        self.prev_pos
    }

    /// Whether the player holds the key to the chamber door.
    #[must_use]
    pub const fn has_key(&self) -> bool {
        self.has_key
    }

    /// Whether the quest has been solved.
    #[must_use]
    pub const fn solved(&self) -> bool {
        self.solved
    }

    /// Whether the player has received the quest from the villager.
    #[must_use]
    pub const fn talked_to_npc(&self) -> bool {
        self.talked_to_npc
    }

    /// Whether the enemy has been defeated.
    #[must_use]
    pub const fn slain_enemy(&self) -> bool {
        self.slain_enemy
    }

    /// Whether walkability checks are currently bypassed.
    #[must_use]
    pub const fn free_roam(&self) -> bool {
        self.free_roam
    }
}

/// Owns every map, the player, and the active-map selector.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    maps: Vec<GridMap>,
    active: MapId,
    player: Player,
}

impl World {
    /// Creates the world with both maps fully built and the player at the
    /// overworld spawn.
    #[must_use]
    pub fn new() -> Self {
        let mut overworld = GridMap::new(
            MapId::Overworld,
            layout::OVERWORLD_SIZE,
            layout::OVERWORLD_SIZE,
        );
        layout::build_overworld(&mut overworld);

        let mut lair = GridMap::new(MapId::Lair, layout::LAIR_SIZE, layout::LAIR_SIZE);
        layout::build_lair(&mut lair);

        Self {
            banner: WELCOME_BANNER,
            maps: vec![overworld, lair],
            active: MapId::Overworld,
            player: Player::new(layout::OVERWORLD_SPAWN),
        }
    }

    /// Borrows the map registered under `id`.
    #[must_use]
    pub fn map(&self, id: MapId) -> &GridMap {
        &self.maps[id.index()]
    }

    /// Mutably borrows the map registered under `id`.
    pub fn map_mut(&mut self, id: MapId) -> &mut GridMap {
        &mut self.maps[id.index()]
    }

    /// Borrows the map the player is currently on.
    #[must_use]
    pub fn active_map(&self) -> &GridMap {
        self.map(self.active)
    }

    /// Mutably borrows the map the player is currently on.
    pub fn active_map_mut(&mut self) -> &mut GridMap {
        let active = self.active;
        self.map_mut(active)
    }

    /// Switches the active-map selector and hands back the newly active map.
    pub fn set_active_map(&mut self, id: MapId) -> &mut GridMap {
        self.active = id;
        self.active_map_mut()
    }

    /// Borrows the player.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies a command to the world, appending resulting events to
/// `out_events`.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    world.player.prev_pos = world.player.pos;
    match command {
        Command::Move { direction } => move_player(world, direction, out_events),
        Command::Interact => interact(world, out_events),
        Command::ToggleFreeRoam => {
            world.player.free_roam = !world.player.free_roam;
            log::info!("free roam {}", world.player.free_roam);
            out_events.push(Event::FreeRoamToggled {
                enabled: world.player.free_roam,
            });
        }
    }
}

fn move_player(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) {
    let from = world.player.pos;
    let dest = from.step(direction);
    let free_roam = world.player.free_roam;

    let map = world.active_map_mut();
    let in_bounds = map.contains(dest);
    let tile = map.here(dest);
    // An in-bounds cell with no entry is open ground; stepping off the map
    // is only possible in free roam.
    let walkable = tile.map_or(in_bounds, |tile| tile.is_walkable());

    if walkable || free_roam {
        world.player.pos = dest;
        out_events.push(Event::PlayerMoved { from, to: dest });
    } else {
        let kind = tile.map_or(TileKind::Wall, |tile| tile.kind());
        log::debug!("move {direction:?} blocked by {kind:?}");
        out_events.push(Event::MoveBlocked { direction, kind });
    }
}

fn interact(world: &mut World, out_events: &mut Vec<Event>) {
    let pos = world.player.pos;

    if neighbor_has_kind(world, pos, TileKind::Npc) {
        talk_to_npc(world, out_events);
        return;
    }

    if neighbor_has_kind(world, pos, TileKind::Door) {
        open_door(world, out_events);
        return;
    }

    let here = world.active_map_mut().here(pos);
    match here.map(|tile| tile.kind()) {
        Some(TileKind::Cave(_)) if world.player.talked_to_npc => {
            if let Some(portal) = here.and_then(|tile| tile.portal()) {
                teleport(world, portal, out_events);
                out_events.push(Event::SpeechRequested {
                    pages: cave_entry_pages(),
                });
            }
        }
        Some(TileKind::Stairs) => {
            if let Some(portal) = here.and_then(|tile| tile.portal()) {
                teleport(world, portal, out_events);
            }
        }
        Some(TileKind::Water) if !world.player.slain_enemy => {
            cast_water(world, out_events);
        }
        _ => {}
    }
}

fn neighbor_has_kind(world: &mut World, pos: GridPos, kind: TileKind) -> bool {
    let map = world.active_map_mut();
    Direction::ALL
        .iter()
        .any(|direction| map.neighbor(pos, *direction).map_or(false, |tile| tile.kind() == kind))
}

fn talk_to_npc(world: &mut World, out_events: &mut Vec<Event>) {
    if world.player.slain_enemy && !world.player.has_key {
        world.player.has_key = true;
        out_events.push(Event::KeyGranted);
        out_events.push(Event::SpeechRequested { pages: key_pages() });
    } else if !world.player.talked_to_npc {
        world.player.talked_to_npc = true;
        out_events.push(Event::SpeechRequested {
            pages: quest_pages(),
        });
    } else {
        out_events.push(Event::SpeechRequested {
            pages: reminder_pages(),
        });
    }
    out_events.push(Event::SceneInvalidated);
}

fn open_door(world: &mut World, out_events: &mut Vec<Event>) {
    if world.player.has_key {
        let map = world.map_mut(MapId::Overworld);
        for step in 0..layout::DOOR_SPAN as i32 {
            map.erase(layout::DOOR_ORIGIN.offset(step, 0));
        }
        out_events.push(Event::SpeechRequested {
            pages: victory_pages(),
        });
        out_events.push(Event::GameWon);
    } else {
        out_events.push(Event::SpeechRequested {
            pages: locked_door_pages(),
        });
        out_events.push(Event::SceneInvalidated);
    }
}

fn cast_water(world: &mut World, out_events: &mut Vec<Event>) {
    world.player.slain_enemy = true;
    world.player.solved = true;
    world
        .map_mut(MapId::Lair)
        .place_enemy_slain(layout::LAIR_ENEMY_POS);
    log::info!("enemy slain");
    out_events.push(Event::EnemySlain {
        pos: layout::LAIR_ENEMY_POS,
    });
    out_events.push(Event::SpeechRequested {
        pages: spell_pages(),
    });
    out_events.push(Event::SceneInvalidated);
}

fn teleport(world: &mut World, portal: Portal, out_events: &mut Vec<Event>) {
    world.active = portal.map();
    world.player.pos = portal.destination();
    world.player.prev_pos = portal.destination();
    log::info!(
        "entering {} at ({}, {})",
        portal.map().name(),
        portal.destination().x(),
        portal.destination().y()
    );
    out_events.push(Event::MapChanged {
        map: portal.map(),
        spawn: portal.destination(),
    });
}

fn quest_pages() -> Vec<SpeechPage> {
    vec![
        SpeechPage::new("Traveller! Please", "hear an old plea."),
        SpeechPage::new("A beast haunts", "the cave south."),
        SpeechPage::new("Water undoes him.", "Go now, be swift!"),
    ]
}

fn reminder_pages() -> Vec<SpeechPage> {
    vec![
        SpeechPage::new("The cave is not", "far. Head south!"),
        SpeechPage::new("Find the beast!", "Make haste!"),
    ]
}

fn key_pages() -> Vec<SpeechPage> {
    vec![
        SpeechPage::new("You felled it!", "However did you?"),
        SpeechPage::new("You saved us all.", "Take this key."),
        SpeechPage::new("It opens the old", "door. Be free!"),
    ]
}

fn locked_door_pages() -> Vec<SpeechPage> {
    vec![SpeechPage::new("Only the worthy", "may pass here.")]
}

fn victory_pages() -> Vec<SpeechPage> {
    vec![SpeechPage::new("Your time is now.", "Rise, worthy one.")]
}

fn cave_entry_pages() -> Vec<SpeechPage> {
    vec![
        SpeechPage::new("A dreadful roar", "echoes below..."),
        SpeechPage::new("I must find the", "right spell!"),
    ]
}

fn spell_pages() -> Vec<SpeechPage> {
    vec![
        SpeechPage::new("    *SWOOSH*", "     *THUMP*"),
        SpeechPage::new("It is done. The", "beast is no more."),
    ]
}

/// Read-only views over world state for systems and adapters.
pub mod query {
    use cavequest_core::{GridPos, MapId, Tile};

    use super::World;

    /// Snapshot of the player captured at a point in time.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PlayerSnapshot {
        /// Cell the player currently occupies.
        pub pos: GridPos,
        /// Cell the player occupied before the most recent command.
        pub prev_pos: GridPos,
        /// Whether the player holds the chamber-door key.
        pub has_key: bool,
        /// Whether the quest has been solved.
        pub solved: bool,
        /// Whether the villager has handed out the quest.
        pub talked_to_npc: bool,
        /// Whether the enemy has been defeated.
        pub slain_enemy: bool,
        /// Whether walkability checks are bypassed.
        pub free_roam: bool,
    }

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Captures a read-only snapshot of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = world.player();
        PlayerSnapshot {
            pos: player.pos(),
            prev_pos: player.prev_pos(),
            has_key: player.has_key(),
            solved: player.solved(),
            talked_to_npc: player.talked_to_npc(),
            slain_enemy: player.slain_enemy(),
            free_roam: player.free_roam(),
        }
    }

    /// Identifier of the map the player is currently on.
    #[must_use]
    pub fn active_map(world: &World) -> MapId {
        world.active
    }

    /// Width and height of the map registered under `id`.
    #[must_use]
    pub fn map_dimensions(world: &World, id: MapId) -> (u32, u32) {
        let map = world.map(id);
        (map.width(), map.height())
    }

    /// Reads the tile at a cell of the active map without mutating it.
    #[must_use]
    pub fn tile_at(world: &World, pos: GridPos) -> Option<Tile> {
        world.active_map().peek(pos)
    }

    /// Renders the map registered under `id` as a text grid.
    #[must_use]
    pub fn map_dump(world: &World, id: MapId) -> String {
        world.map(id).dump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(world: &mut World, direction: Direction) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Move { direction }, &mut events);
        events
    }

    fn walk(world: &mut World, direction: Direction, count: u32) {
        for _ in 0..count {
            let events = step(world, direction);
            assert!(
                matches!(events.as_slice(), [Event::PlayerMoved { .. }]),
                "expected unobstructed walk, got {events:?}"
            );
        }
    }

    fn interact(world: &mut World) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Interact, &mut events);
        events
    }

    #[test]
    fn banner_is_exposed_through_query() {
        let world = World::new();
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn player_spawns_on_the_overworld() {
        let world = World::new();
        let player = query::player(&world);
        assert_eq!(query::active_map(&world), MapId::Overworld);
        assert_eq!(player.pos, GridPos::new(5, 5));
        assert_eq!(player.prev_pos, player.pos);
        assert!(!player.has_key);
        assert!(!player.free_roam);
    }

    #[test]
    fn open_ground_permits_movement_and_records_prev_pos() {
        let mut world = World::new();
        let events = step(&mut world, Direction::East);
        assert_eq!(
            events,
            vec![Event::PlayerMoved {
                from: GridPos::new(5, 5),
                to: GridPos::new(6, 5),
            }]
        );
        let player = query::player(&world);
        assert_eq!(player.pos, GridPos::new(6, 5));
        assert_eq!(player.prev_pos, GridPos::new(5, 5));
    }

    #[test]
    fn border_wall_blocks_movement() {
        let mut world = World::new();
        walk(&mut world, Direction::West, 4);
        let events = step(&mut world, Direction::West);
        assert_eq!(
            events,
            vec![Event::MoveBlocked {
                direction: Direction::West,
                kind: TileKind::Wall,
            }]
        );
        assert_eq!(query::player(&world).pos, GridPos::new(1, 5));
    }

    #[test]
    fn free_roam_walks_through_walls() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::ToggleFreeRoam, &mut events);
        assert_eq!(events, vec![Event::FreeRoamToggled { enabled: true }]);

        walk(&mut world, Direction::West, 5);
        assert_eq!(query::player(&world).pos, GridPos::new(0, 5));
    }

    #[test]
    fn toggling_free_roam_twice_restores_collision() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::ToggleFreeRoam, &mut events);
        apply(&mut world, Command::ToggleFreeRoam, &mut events);
        assert_eq!(
            events,
            vec![
                Event::FreeRoamToggled { enabled: true },
                Event::FreeRoamToggled { enabled: false },
            ]
        );
        assert!(!query::player(&world).free_roam);
    }

    #[test]
    fn villager_hands_out_the_quest_once() {
        let mut world = World::new();
        walk(&mut world, Direction::East, 4);

        let events = interact(&mut world);
        let Some(Event::SpeechRequested { pages }) = events.first() else {
            panic!("expected speech, got {events:?}");
        };
        assert_eq!(pages.len(), 3);
        assert_eq!(events.last(), Some(&Event::SceneInvalidated));
        assert!(query::player(&world).talked_to_npc);

        // Asking again before the deed is done gets the reminder.
        let events = interact(&mut world);
        let Some(Event::SpeechRequested { pages }) = events.first() else {
            panic!("expected speech, got {events:?}");
        };
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn speech_lines_fit_the_overlay() {
        let all_pages = [
            quest_pages(),
            reminder_pages(),
            key_pages(),
            locked_door_pages(),
            victory_pages(),
            cave_entry_pages(),
            spell_pages(),
        ];
        for pages in &all_pages {
            for page in pages {
                assert!(page.top().chars().count() <= cavequest_core::SPEECH_LINE_CHARS);
                assert!(page.bottom().chars().count() <= cavequest_core::SPEECH_LINE_CHARS);
            }
        }
    }

    #[test]
    fn cave_ignores_the_player_before_the_quest_is_taken() {
        let mut world = World::new();
        walk(&mut world, Direction::South, 15);
        walk(&mut world, Direction::East, 1);
        assert_eq!(query::player(&world).pos, GridPos::new(6, 20));

        let events = interact(&mut world);
        assert!(events.is_empty(), "got {events:?}");
        assert_eq!(query::active_map(&world), MapId::Overworld);
    }

    #[test]
    fn door_stays_locked_without_the_key() {
        let mut world = World::new();
        walk(&mut world, Direction::South, 6);
        walk(&mut world, Direction::East, 28);
        assert_eq!(query::player(&world).pos, GridPos::new(33, 11));

        let events = interact(&mut world);
        let Some(Event::SpeechRequested { pages }) = events.first() else {
            panic!("expected speech, got {events:?}");
        };
        assert_eq!(pages.len(), 1);
        assert_eq!(events.last(), Some(&Event::SceneInvalidated));
        assert!(!events.contains(&Event::GameWon));
        assert_eq!(
            query::tile_at(&world, GridPos::new(33, 10)).map(|tile| tile.kind()),
            Some(TileKind::Door)
        );
    }

    #[test]
    fn map_dump_covers_every_row() {
        let world = World::new();
        let dump = query::map_dump(&world, MapId::Lair);
        assert_eq!(dump.lines().count(), 16);
        assert!(dump.lines().all(|line| line.chars().count() == 16));
        assert!(dump.contains('E'));
        assert!(dump.contains('S'));
    }
}
