#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the CaveQuest experience.

use cavequest_core::MapId;
use cavequest_world::{query, World};

/// Produces data required to greet the player and seed the first frame.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Derives the two status lines shown outside the viewport: where the
    /// player is, and what the quest currently expects of them.
    #[must_use]
    pub fn status_lines(&self, world: &World) -> (String, String) {
        let player = query::player(world);
        let map = query::active_map(world);
        let upper = format!(
            "{} ({}, {})",
            map.name(),
            player.pos.x(),
            player.pos.y()
        );
        let lower = if player.has_key {
            String::from("find the door")
        } else if player.slain_enemy {
            String::from("report back")
        } else if player.talked_to_npc {
            String::from("hunt the beast")
        } else {
            String::from("talk to someone")
        };
        (upper, lower)
    }

    /// Renders every map as a text grid, in registry order, for terminal
    /// inspection.
    #[must_use]
    pub fn map_dumps(&self, world: &World) -> Vec<(MapId, String)> {
        MapId::ALL
            .iter()
            .map(|id| (*id, query::map_dump(world, *id)))
            .collect()
    }
}
