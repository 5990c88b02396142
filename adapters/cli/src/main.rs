#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the CaveQuest experience.
//!
//! The adapter owns the frame loop glue: it resolves button snapshots into
//! commands, applies them to the world, reacts to the resulting events, and
//! refreshes the scene that the macroquad backend paints. Dialogue is modal:
//! while pages are queued the action button pages through them and no
//! commands reach the world.

use std::{collections::VecDeque, path::PathBuf};

use anyhow::Result;
use cavequest_core::{ButtonState, Command, Event, SpeechPage};
use cavequest_rendering::{
    AudioSink, PlayerPresentation, Presentation, RenderingBackend, Scene, SilentAudio, SoundCue,
    SpeechOverlay, StatusPresentation,
};
use cavequest_rendering_macroquad::{default_clear_color, BackendConfig, MacroquadBackend};
use cavequest_system_actions::ActionResolver;
use cavequest_system_bootstrap::Bootstrap;
use cavequest_world::{self as world, query, World};
use clap::Parser;

/// Command-line options for the CaveQuest adapter.
#[derive(Debug, Parser)]
#[command(name = "cavequest", about = "Tile-based adventure on a simulated handheld display")]
struct Args {
    /// Print every map as a text grid and exit.
    #[arg(long)]
    dump_maps: bool,
    /// Start with walkability checks disabled.
    #[arg(long)]
    free_roam: bool,
    /// Window scale override.
    #[arg(long)]
    scale: Option<f32>,
    /// Path to a backend configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

struct App {
    world: World,
    resolver: ActionResolver,
    bootstrap: Bootstrap,
    speech_queue: VecDeque<SpeechPage>,
    audio: SilentAudio,
    pending_full_redraw: bool,
    victory_pending: bool,
}

impl App {
    fn new(world: World) -> Self {
        Self {
            world,
            resolver: ActionResolver::default(),
            bootstrap: Bootstrap::default(),
            speech_queue: VecDeque::new(),
            audio: SilentAudio::default(),
            pending_full_redraw: true,
            victory_pending: false,
        }
    }

    fn frame(&mut self, buttons: ButtonState, scene: &mut Scene) {
        if scene.game_over {
            return;
        }

        let mut events = Vec::new();
        if self.speech_queue.is_empty() {
            if let Some(command) = self.resolver.resolve(buttons) {
                world::apply(&mut self.world, command, &mut events);
            }
        } else if buttons.action {
            let _read = self.speech_queue.pop_front();
            self.audio.play(SoundCue::Speech);
            if self.speech_queue.is_empty() {
                // The overlay covered the viewport; repaint it all.
                self.pending_full_redraw = true;
            }
        }

        for event in &events {
            self.handle_event(event);
        }

        // The closing speech plays out before the end screen takes over.
        if self.victory_pending && self.speech_queue.is_empty() {
            scene.game_over = true;
        }

        scene.speech = self.speech_queue.front().map(|page| SpeechOverlay {
            page: page.clone(),
        });

        let player = query::player(&self.world);
        let (upper, lower) = self.bootstrap.status_lines(&self.world);
        scene.status = StatusPresentation { upper, lower };

        let dimensions = query::map_dimensions(&self.world, query::active_map(&self.world));
        let full = std::mem::take(&mut self.pending_full_redraw);
        let world_ref = &self.world;
        scene.refresh(
            PlayerPresentation {
                pos: player.pos,
                prev_pos: player.prev_pos,
                has_key: player.has_key,
            },
            dimensions,
            |pos| query::tile_at(world_ref, pos),
            full,
        );
    }

    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::SpeechRequested { pages } => {
                self.speech_queue.extend(pages.iter().cloned());
                self.audio.play(SoundCue::Speech);
            }
            Event::MapChanged { map, spawn } => {
                log::info!("map changed to {} at ({}, {})", map.name(), spawn.x(), spawn.y());
                self.pending_full_redraw = true;
            }
            Event::SceneInvalidated => {
                self.pending_full_redraw = true;
            }
            Event::GameWon => {
                self.audio.play(SoundCue::Victory);
                self.victory_pending = true;
            }
            Event::EnemySlain { pos } => {
                log::info!("enemy slain at ({}, {})", pos.x(), pos.y());
                self.audio.play(SoundCue::EnemySlain);
            }
            Event::KeyGranted => {
                log::info!("key granted");
            }
            Event::PlayerMoved { from, to } => {
                log::debug!(
                    "player moved ({}, {}) -> ({}, {})",
                    from.x(),
                    from.y(),
                    to.x(),
                    to.y()
                );
            }
            Event::MoveBlocked { direction, kind } => {
                log::debug!("move {direction:?} blocked by {kind:?}");
            }
            Event::FreeRoamToggled { enabled } => {
                log::info!("free roam {}", if *enabled { "enabled" } else { "disabled" });
            }
        }
    }
}

/// Entry point for the CaveQuest command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut world = World::new();
    if args.free_roam {
        let mut events = Vec::new();
        world::apply(&mut world, Command::ToggleFreeRoam, &mut events);
    }

    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(&world));

    if args.dump_maps {
        for (id, grid) in bootstrap.map_dumps(&world) {
            println!("{}:", id.name());
            println!("{grid}");
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => BackendConfig::load(path)?,
        None => BackendConfig::default(),
    };
    if let Some(scale) = args.scale {
        config.scale = scale;
    }

    let player = query::player(&world);
    let (upper, lower) = bootstrap.status_lines(&world);
    let scene = Scene::new(
        PlayerPresentation {
            pos: player.pos,
            prev_pos: player.prev_pos,
            has_key: player.has_key,
        },
        StatusPresentation { upper, lower },
    );
    let presentation = Presentation::new("CaveQuest", default_clear_color(), scene);

    let mut app = App::new(world);
    let backend = MacroquadBackend::new(config);
    backend.run(presentation, move |_dt, buttons, scene| {
        app.frame(buttons, scene);
    })
}
