//! The simulation tick
//!
//! Registered as the `GameManager` tag's explicit-update hook and driven once
//! per frame by [`crate::session::GameSession::tick`]. Phase order is fixed:
//! integration, instance propagation, win/lose evaluation (loss before win),
//! collision resolution, then the destruction sweep. The phases are public so
//! tests can drive them individually.

use arena_engine::prelude::*;

use crate::components::{
    Enemy, GameOver, GpuInstance, Health, MeshCollection, Player, Transform, Velocity,
};
use crate::session::{DeltaTime, Outcome};

use super::{attach_logged, collision, destruction};

/// One full tick, gated on the terminal state
pub fn update_game_manager(registry: &mut Registry, manager: Entity) {
    if registry.has::<GameOver>(manager) {
        return;
    }

    let Some(dt) = registry.ctx().get::<DeltaTime>().map(|dt| dt.seconds) else {
        log::error!("tick driven without elapsed time in the context; skipping frame");
        return;
    };

    integrate(registry, dt);
    propagate_instances(registry);
    evaluate_outcome(registry, manager);
    collision::resolve_collisions(registry);
    destruction::resolve_deaths(registry);
    destruction::sweep_marked(registry);
}

/// Advance every `(Velocity, Transform)` entity by one step
///
/// The translation moves by `velocity * dt` in world space, independent of
/// the transform's rotation and scale.
pub fn integrate(registry: &mut Registry, dt: f32) {
    for entity in registry.view::<(Velocity, Transform)>() {
        let Some(velocity) = registry.try_get::<Velocity>(entity).map(|v| v.linear) else {
            continue;
        };
        if let Some(transform) = registry.try_get_mut::<Transform>(entity) {
            transform.matrix = transform.matrix.append_translation(&(velocity * dt));
        }
    }
}

/// Copy each owner's world matrix into its sub-entities' instance data
///
/// The rendering collaborator reads the refreshed `GpuInstance` transforms on
/// its own schedule next frame.
pub fn propagate_instances(registry: &mut Registry) {
    for entity in registry.view::<(Transform, MeshCollection)>() {
        let Some(matrix) = registry.try_get::<Transform>(entity).map(|t| t.matrix) else {
            continue;
        };
        let Some(meshes) = registry
            .try_get::<MeshCollection>(entity)
            .map(|collection| collection.meshes.clone())
        else {
            continue;
        };
        for mesh in meshes {
            if let Some(instance) = registry.try_get_mut::<GpuInstance>(mesh) {
                instance.transform = matrix;
            }
        }
    }
}

/// Evaluate the loss and win conditions, loss first
///
/// Also drives each player's per-frame update while counting: movement from
/// input, firing, and timer decay all run through the player's
/// explicit-update hook here.
pub fn evaluate_outcome(registry: &mut Registry, manager: Entity) {
    let players = registry.view::<(Player,)>();
    let mut downed = 0;
    for player in &players {
        if registry
            .try_get::<Health>(*player)
            .is_some_and(Health::is_dead)
        {
            downed += 1;
        }
        registry.notify::<Player>(*player);
    }

    // Loss check first; an empty roster counts as all-down
    if downed >= players.len() && !registry.has::<GameOver>(manager) {
        attach_logged(registry, manager, GameOver);
        registry.ctx_mut().insert(Outcome::Defeat);
        log::info!("all players down; game over");
    }

    if !registry.has::<GameOver>(manager) && registry.view::<(Enemy,)>().is_empty() {
        attach_logged(registry, manager, GameOver);
        registry.ctx_mut().insert(Outcome::Victory);
        log::info!("arena cleared; you win");
    }
}
