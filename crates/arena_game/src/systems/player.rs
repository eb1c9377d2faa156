//! Player construction and per-frame update

use arena_engine::prelude::*;

use crate::components::{Collidable, Firing, Health, Invulnerability, Transform, Velocity};
use crate::config::GameConfig;
use crate::input::InputSnapshot;

use super::{attach_logged, build_mesh_collection, bullet, delta_seconds};

const AXIS_EPSILON: f32 = 1e-6;

/// Construction hook for the `Player` tag
pub fn construct_player(registry: &mut Registry, entity: Entity) {
    let Some(config) = registry
        .ctx()
        .get::<GameConfig>()
        .map(|config| config.player.clone())
    else {
        log::error!("player construction without game config in context");
        return;
    };

    let placement = build_mesh_collection(registry, entity, &config.model);
    attach_logged(registry, entity, Transform::from_matrix(placement));
    attach_logged(registry, entity, Health::new(config.hitpoints));
    // Zero until input arrives; integration applies whatever the update sets
    attach_logged(registry, entity, Velocity::default());
    attach_logged(registry, entity, Collidable);
}

/// Per-frame update hook for the `Player` tag
///
/// Driven from inside the tick. Converts the input snapshot into a velocity,
/// fires when a fire direction is held and no cooldown is running, and decays
/// the `Firing` and `Invulnerability` timers.
pub fn update_player(registry: &mut Registry, entity: Entity) {
    let Some(config) = registry
        .ctx()
        .get::<GameConfig>()
        .map(|config| config.player.clone())
    else {
        return;
    };
    let dt = delta_seconds(registry);
    let input = registry
        .ctx()
        .get::<InputSnapshot>()
        .copied()
        .unwrap_or_default();

    // Steering: speed is constant in every direction, including diagonals
    let move_direction = input.move_direction();
    let linear = if move_direction.magnitude_squared() > AXIS_EPSILON {
        move_direction.normalize() * config.speed
    } else {
        Vec3::zeros()
    };
    if let Some(velocity) = registry.try_get_mut::<Velocity>(entity) {
        velocity.linear = linear;
    }

    if registry.has::<Firing>(entity) {
        // Cooling down; no shot this frame
        let expired = registry
            .try_get_mut::<Firing>(entity)
            .map(|firing| {
                firing.remaining -= dt;
                firing.remaining <= 0.0
            })
            .unwrap_or(false);
        if expired {
            registry.detach::<Firing>(entity);
        }
    } else {
        let fire_direction = input.fire_direction();
        if fire_direction.magnitude_squared() > AXIS_EPSILON {
            attach_logged(registry, entity, Firing::new(config.firerate));
            bullet::fire_bullet(registry, entity, fire_direction);
        }
    }

    let immunity_over = registry
        .try_get_mut::<Invulnerability>(entity)
        .map(|window| {
            window.remaining -= dt;
            window.remaining <= 0.0
        })
        .unwrap_or(false);
    if immunity_over {
        registry.detach::<Invulnerability>(entity);
    }
}
