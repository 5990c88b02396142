use cavequest_core::{ButtonState, Command, Direction};
use cavequest_system_actions::ActionResolver;

#[test]
fn idle_snapshot_resolves_to_nothing() {
    let resolver = ActionResolver::default();
    assert_eq!(resolver.resolve(ButtonState::default()), None);
}

#[test]
fn each_control_maps_to_its_command() {
    let resolver = ActionResolver::default();
    let cases = [
        (
            ButtonState {
                action: true,
                ..ButtonState::default()
            },
            Command::Interact,
        ),
        (
            ButtonState {
                down: true,
                ..ButtonState::default()
            },
            Command::Move {
                direction: Direction::South,
            },
        ),
        (
            ButtonState {
                up: true,
                ..ButtonState::default()
            },
            Command::Move {
                direction: Direction::North,
            },
        ),
        (
            ButtonState {
                left: true,
                ..ButtonState::default()
            },
            Command::Move {
                direction: Direction::West,
            },
        ),
        (
            ButtonState {
                right: true,
                ..ButtonState::default()
            },
            Command::Move {
                direction: Direction::East,
            },
        ),
        (
            ButtonState {
                center: true,
                ..ButtonState::default()
            },
            Command::ToggleFreeRoam,
        ),
    ];
    for (buttons, expected) in cases {
        assert_eq!(resolver.resolve(buttons), Some(expected), "{buttons:?}");
    }
}

#[test]
fn action_wins_over_simultaneous_movement() {
    let resolver = ActionResolver::default();
    let buttons = ButtonState {
        action: true,
        down: true,
        left: true,
        ..ButtonState::default()
    };
    assert_eq!(resolver.resolve(buttons), Some(Command::Interact));
}

#[test]
fn opposing_directions_resolve_deterministically() {
    let resolver = ActionResolver::default();
    let buttons = ButtonState {
        up: true,
        down: true,
        ..ButtonState::default()
    };
    assert_eq!(
        resolver.resolve(buttons),
        Some(Command::Move {
            direction: Direction::South,
        })
    );
}

#[test]
fn menu_swallows_the_frame() {
    let resolver = ActionResolver::default();
    let buttons = ButtonState {
        menu: true,
        action: true,
        down: true,
        ..ButtonState::default()
    };
    assert_eq!(resolver.resolve(buttons), None);
}
