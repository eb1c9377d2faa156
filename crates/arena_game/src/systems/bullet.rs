//! Bullet construction and firing

use arena_engine::prelude::*;

use crate::components::{Bullet, Collidable, Transform, Velocity};
use crate::config::GameConfig;

use super::{attach_logged, build_mesh_collection};

/// Construction hook for the `Bullet` tag
///
/// Placement and velocity stay zero here; the firing site overwrites both
/// immediately after the tag attach returns.
pub fn construct_bullet(registry: &mut Registry, entity: Entity) {
    let Some(model) = registry
        .ctx()
        .get::<GameConfig>()
        .map(|config| config.bullet.model.clone())
    else {
        log::error!("bullet construction without game config in context");
        return;
    };

    build_mesh_collection(registry, entity, &model);
    attach_logged(registry, entity, Transform::identity());
    attach_logged(registry, entity, Velocity::default());
    attach_logged(registry, entity, Collidable);
}

/// Spawn a bullet at the shooter's placement, flying along `direction`
pub fn fire_bullet(registry: &mut Registry, shooter: Entity, direction: Vec3) {
    let Some(speed) = registry
        .ctx()
        .get::<GameConfig>()
        .map(|config| config.bullet.speed)
    else {
        log::error!("bullet fired without game config in context");
        return;
    };
    let Some(origin) = registry.try_get::<Transform>(shooter).copied() else {
        log::warn!("firing entity has no transform; dropping shot");
        return;
    };

    let bullet = registry.create();
    attach_logged(registry, bullet, Bullet);

    if let Some(transform) = registry.try_get_mut::<Transform>(bullet) {
        *transform = origin;
    }
    if let Some(velocity) = registry.try_get_mut::<Velocity>(bullet) {
        velocity.linear = direction.normalize() * speed;
    }
}
