//! Game session
//!
//! One `GameSession` owns the registry, wires all component logic at
//! construction, and is the host loop's entire interface to the simulation:
//! spawn the initial entities, call [`GameSession::tick`] once per frame with
//! the clamped elapsed step and the frame's input snapshot, and watch
//! [`GameSession::outcome`] for the terminal signal.

use arena_engine::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::ModelCatalog;
use crate::components::{Bullet, Enemy, GameManager, GameOver, Obstacle, Player, Transform};
use crate::config::GameConfig;
use crate::input::InputSnapshot;
use crate::systems;

/// Elapsed simulation time for the current tick, in seconds
///
/// Context singleton, published by [`GameSession::tick`]. The host clamps the
/// raw frame time upstream so a dragged window cannot tunnel entities through
/// colliders.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeltaTime {
    /// Seconds since the previous tick
    pub seconds: f32,
}

/// Session random number generator (enemy headings)
///
/// Context singleton. Seeded from entropy by default; tests seed it through
/// [`GameSession::with_rng_seed`] for reproducible runs.
pub struct SessionRng(pub StdRng);

/// Terminal result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every enemy destroyed
    Victory,
    /// Every player down
    Defeat,
}

/// Owner of one simulation session
pub struct GameSession {
    registry: Registry,
    manager: Entity,
}

impl GameSession {
    /// Create a session with an entropy-seeded random generator
    #[must_use]
    pub fn new(config: GameConfig, catalog: ModelCatalog) -> Self {
        Self::build(config, catalog, StdRng::from_entropy())
    }

    /// Create a session with a fixed random seed (deterministic spawns)
    #[must_use]
    pub fn with_rng_seed(config: GameConfig, catalog: ModelCatalog, seed: u64) -> Self {
        Self::build(config, catalog, StdRng::seed_from_u64(seed))
    }

    fn build(config: GameConfig, catalog: ModelCatalog, rng: StdRng) -> Self {
        let mut registry = Registry::new();
        systems::register_component_logic(&mut registry);

        registry.ctx_mut().insert(config);
        registry.ctx_mut().insert(catalog);
        registry.ctx_mut().insert(SessionRng(rng));

        let manager = registry.create();
        systems::attach_logged(&mut registry, manager, GameManager);

        Self { registry, manager }
    }

    /// The underlying registry
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The underlying registry, mutable
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The manager entity driving the tick
    #[must_use]
    pub fn manager(&self) -> Entity {
        self.manager
    }

    /// Spawn a player at its model's catalog placement
    pub fn spawn_player(&mut self) -> Entity {
        let entity = self.registry.create();
        systems::attach_logged(&mut self.registry, entity, Player);
        entity
    }

    /// Spawn an enemy at its model's catalog placement
    pub fn spawn_enemy(&mut self) -> Entity {
        let entity = self.registry.create();
        systems::attach_logged(&mut self.registry, entity, Enemy);
        entity
    }

    /// Spawn an enemy at an explicit placement
    pub fn spawn_enemy_at(&mut self, placement: Mat4) -> Entity {
        let entity = self.spawn_enemy();
        if let Some(transform) = self.registry.try_get_mut::<Transform>(entity) {
            transform.matrix = placement;
        }
        entity
    }

    /// Spawn a static obstacle at an explicit placement
    pub fn spawn_obstacle(&mut self, placement: Mat4) -> Entity {
        let entity = self.registry.create();
        systems::attach_logged(&mut self.registry, entity, Obstacle);
        if let Some(transform) = self.registry.try_get_mut::<Transform>(entity) {
            transform.matrix = placement;
        }
        entity
    }

    /// Fire a bullet from an arbitrary placement (scripted/test shots;
    /// players fire through their per-frame update)
    pub fn spawn_bullet_at(&mut self, placement: Mat4) -> Entity {
        let entity = self.registry.create();
        systems::attach_logged(&mut self.registry, entity, Bullet);
        if let Some(transform) = self.registry.try_get_mut::<Transform>(entity) {
            transform.matrix = placement;
        }
        entity
    }

    /// Advance the simulation by one tick
    ///
    /// Publishes the elapsed step and input snapshot into the context, then
    /// drives the tick through the manager's explicit-update hook. Runs to
    /// completion before returning; there is no suspension point inside.
    pub fn tick(&mut self, dt: f32, input: InputSnapshot) {
        self.registry.ctx_mut().insert(DeltaTime {
            seconds: dt.max(0.0),
        });
        self.registry.ctx_mut().insert(input);
        self.registry.notify::<GameManager>(self.manager);
    }

    /// The terminal signal, once the session has ended
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.registry.ctx().get::<Outcome>().copied()
    }

    /// Has the session reached its terminal state?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.registry.has::<GameOver>(self.manager)
    }
}
