use cavequest_core::{Command, Direction, Event, GridPos, MapId, TileKind};
use cavequest_world::{self as world, query, World};

fn walk(world: &mut World, direction: Direction, count: u32) {
    for _ in 0..count {
        let mut events = Vec::new();
        world::apply(world, Command::Move { direction }, &mut events);
        assert!(
            matches!(events.as_slice(), [Event::PlayerMoved { .. }]),
            "expected unobstructed walk, got {events:?}"
        );
    }
}

fn interact(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Interact, &mut events);
    events
}

fn speech_page_count(events: &[Event]) -> usize {
    events
        .iter()
        .find_map(|event| match event {
            Event::SpeechRequested { pages } => Some(pages.len()),
            _ => None,
        })
        .unwrap_or(0)
}

#[test]
fn quest_plays_through_to_the_open_door() {
    let mut world = World::new();
    assert_eq!(query::active_map(&world), MapId::Overworld);
    assert_eq!(query::player(&world).pos, GridPos::new(5, 5));

    // Take the quest from the villager east of the spawn.
    walk(&mut world, Direction::East, 4);
    let events = interact(&mut world);
    assert_eq!(speech_page_count(&events), 3);
    assert!(query::player(&world).talked_to_npc);

    // Head south to the cave entrance and climb down.
    walk(&mut world, Direction::South, 15);
    walk(&mut world, Direction::West, 3);
    assert_eq!(query::player(&world).pos, GridPos::new(6, 20));
    let events = interact(&mut world);
    assert!(events.contains(&Event::MapChanged {
        map: MapId::Lair,
        spawn: GridPos::new(8, 14),
    }));
    assert_eq!(query::active_map(&world), MapId::Lair);
    assert_eq!(query::player(&world).pos, GridPos::new(8, 14));

    // Stand on the water cell and cast.
    walk(&mut world, Direction::West, 4);
    walk(&mut world, Direction::North, 6);
    assert_eq!(query::player(&world).pos, GridPos::new(4, 8));
    let events = interact(&mut world);
    assert!(events.contains(&Event::EnemySlain {
        pos: GridPos::new(8, 8),
    }));
    let player = query::player(&world);
    assert!(player.slain_enemy);
    assert!(player.solved);
    assert_eq!(
        world
            .map(MapId::Lair)
            .peek(GridPos::new(8, 8))
            .map(|tile| tile.kind()),
        Some(TileKind::EnemySlain)
    );

    // Casting again does nothing; the deed is done.
    let events = interact(&mut world);
    assert!(events.is_empty(), "got {events:?}");

    // Climb the stairs back to the overworld spawn.
    walk(&mut world, Direction::North, 2);
    let events = interact(&mut world);
    assert!(events.contains(&Event::MapChanged {
        map: MapId::Overworld,
        spawn: GridPos::new(5, 5),
    }));
    assert_eq!(query::active_map(&world), MapId::Overworld);

    // Report back and collect the key.
    walk(&mut world, Direction::East, 4);
    let events = interact(&mut world);
    assert!(events.contains(&Event::KeyGranted));
    assert_eq!(speech_page_count(&events), 3);
    assert!(query::player(&world).has_key);

    // Walk to the chamber door and open it.
    walk(&mut world, Direction::South, 6);
    walk(&mut world, Direction::East, 24);
    assert_eq!(query::player(&world).pos, GridPos::new(33, 11));
    let events = interact(&mut world);
    assert!(events.contains(&Event::GameWon));

    // The door segments are erased, leaving clear tombstones behind.
    for x in 33..37 {
        assert_eq!(
            query::tile_at(&world, GridPos::new(x, 10)).map(|tile| tile.kind()),
            Some(TileKind::Clear)
        );
    }
}

#[test]
fn stairs_work_without_the_quest_flag() {
    let mut world = World::new();
    // Free roam straight into the lair via the cave, skipping the villager
    // is impossible; the cave checks the quest flag. Verified here from the
    // lair side after taking the quest and entering normally.
    walk(&mut world, Direction::East, 4);
    let _quest = interact(&mut world);
    walk(&mut world, Direction::West, 4);
    walk(&mut world, Direction::South, 15);
    let _entry = interact(&mut world);
    assert_eq!(query::active_map(&world), MapId::Lair);

    // Straight to the stairs without touching the water.
    walk(&mut world, Direction::West, 4);
    walk(&mut world, Direction::North, 8);
    assert_eq!(query::player(&world).pos, GridPos::new(4, 6));
    let events = interact(&mut world);
    assert!(events.contains(&Event::MapChanged {
        map: MapId::Overworld,
        spawn: GridPos::new(5, 5),
    }));
    assert!(!query::player(&world).slain_enemy);
}
