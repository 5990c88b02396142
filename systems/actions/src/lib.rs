#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system that resolves button snapshots into world commands.
//!
//! At most one command is resolved per frame. When several controls are held
//! simultaneously a fixed priority decides the winner, so the world never
//! receives conflicting commands from a single snapshot.

use cavequest_core::{ButtonState, Command, Direction};

/// Resolves raw button snapshots into at most one [`Command`] per frame.
///
/// Priority order when several controls are active at once: menu (reserved,
/// swallows the frame), action, down, up, left, right, centre press.
#[derive(Debug, Default)]
pub struct ActionResolver;

impl ActionResolver {
    /// Resolves one frame's button snapshot.
    ///
    /// Returns `None` when nothing is pressed, and also when the menu button
    /// is held: the menu is reserved and swallows the frame so no movement
    /// leaks through underneath it.
    #[must_use]
    pub fn resolve(&self, buttons: ButtonState) -> Option<Command> {
        if buttons.menu {
            return None;
        }
        if buttons.action {
            return Some(Command::Interact);
        }
        if buttons.down {
            return Some(Command::Move {
                direction: Direction::South,
            });
        }
        if buttons.up {
            return Some(Command::Move {
                direction: Direction::North,
            });
        }
        if buttons.left {
            return Some(Command::Move {
                direction: Direction::West,
            });
        }
        if buttons.right {
            return Some(Command::Move {
                direction: Direction::East,
            });
        }
        if buttons.center {
            return Some(Command::ToggleFreeRoam);
        }
        None
    }
}
