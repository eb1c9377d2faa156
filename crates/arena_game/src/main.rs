//! Headless demo host loop
//!
//! Stands in for the real host: no window, no renderer, no input devices.
//! It loads the config, builds a small built-in model catalog, spawns an
//! arena, and ticks the simulation with a clamped wall-clock step and a
//! scripted firing pattern until the session ends.

use std::time::{Duration, Instant};

use arena_engine::foundation::logging;
use arena_engine::prelude::*;

use arena_game::{GameConfig, GameSession, InputSnapshot, ModelCatalog, ModelPrototype, Outcome};

/// Elapsed-step cap; prevents a stalled host from tunneling entities
/// through colliders
const MAX_STEP: f32 = 1.0 / 30.0;

/// Demo safety net: give up after this much wall-clock time
const DEMO_TIMEOUT: Duration = Duration::from_secs(300);

const ARENA_HALF_SIZE: f32 = 12.0;

fn main() {
    logging::init();

    let config = match GameConfig::load_from_file("game.toml") {
        Ok(config) => config,
        Err(err) => {
            log::warn!("falling back to default config: {err}");
            GameConfig::default()
        }
    };

    let mut session = GameSession::new(config, demo_catalog());
    session.spawn_player();
    session.spawn_enemy_at(Mat4::new_translation(&Vec3::new(6.0, 0.0, 4.0)));
    session.spawn_enemy_at(Mat4::new_translation(&Vec3::new(-5.0, 0.0, -6.0)));
    spawn_arena_walls(&mut session);

    log::info!(
        "arena up: {} entities, fighting until one side wins",
        session.registry().entity_count()
    );

    let started = Instant::now();
    let mut last_frame = Instant::now();
    while session.outcome().is_none() {
        if started.elapsed() > DEMO_TIMEOUT {
            log::warn!("demo timed out without an outcome");
            break;
        }

        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32().min(MAX_STEP);
        last_frame = now;

        session.tick(dt, scripted_input(started.elapsed().as_secs_f32()));
        std::thread::sleep(Duration::from_millis(16));
    }

    match session.outcome() {
        Some(Outcome::Victory) => log::info!("demo over: victory"),
        Some(Outcome::Defeat) => log::info!("demo over: defeat"),
        None => log::info!("demo over: no result"),
    }
}

/// Fire in a rotating cardinal direction, two seconds per heading
fn scripted_input(elapsed: f32) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    match ((elapsed / 2.0) as u32) % 4 {
        0 => input.fire_up = 1.0,
        1 => input.fire_right = 1.0,
        2 => input.fire_down = 1.0,
        _ => input.fire_left = 1.0,
    }
    input
}

/// Box models for every archetype; real hosts load these from model files
fn demo_catalog() -> ModelCatalog {
    let mut catalog = ModelCatalog::new();
    catalog.insert(
        "player",
        ModelPrototype::box_model(Vec3::new(0.5, 0.5, 0.5), [0.2, 0.6, 1.0, 1.0]),
    );
    catalog.insert(
        "enemy",
        ModelPrototype::box_model(Vec3::new(0.6, 0.6, 0.6), [1.0, 0.3, 0.2, 1.0]),
    );
    catalog.insert(
        "bullet",
        ModelPrototype::box_model(Vec3::new(0.15, 0.15, 0.15), [1.0, 1.0, 0.4, 1.0]),
    );
    catalog.insert(
        "wall",
        ModelPrototype::box_model(Vec3::new(0.5, 0.5, 0.5), [0.5, 0.5, 0.5, 1.0]),
    );
    catalog
}

/// Four walls enclosing the arena, stretched out of the unit wall model
fn spawn_arena_walls(session: &mut GameSession) {
    let span = ARENA_HALF_SIZE.mul_add(2.0, 2.0);
    let east_west = Vec3::new(span, 2.0, 1.0);
    let north_south = Vec3::new(1.0, 2.0, span);
    let placements = [
        (Vec3::new(0.0, 0.0, ARENA_HALF_SIZE), east_west),
        (Vec3::new(0.0, 0.0, -ARENA_HALF_SIZE), east_west),
        (Vec3::new(ARENA_HALF_SIZE, 0.0, 0.0), north_south),
        (Vec3::new(-ARENA_HALF_SIZE, 0.0, 0.0), north_south),
    ];
    for (offset, scale) in placements {
        let placement = Mat4::new_translation(&offset) * Mat4::new_nonuniform_scaling(&scale);
        session.spawn_obstacle(placement);
    }
}
