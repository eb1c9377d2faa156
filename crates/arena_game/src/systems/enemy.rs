//! Enemy construction

use arena_engine::prelude::*;
use rand::Rng;

use crate::components::{Collidable, Health, Shatters, Transform, Velocity};
use crate::config::GameConfig;
use crate::session::SessionRng;

use super::{attach_logged, build_mesh_collection};

/// Construction hook for the `Enemy` tag
///
/// Fragments spawned by the shatter cascade run through this too; the
/// cascade overwrites the transform and shatter state afterward.
pub fn construct_enemy(registry: &mut Registry, entity: Entity) {
    let Some(config) = registry
        .ctx()
        .get::<GameConfig>()
        .map(|config| config.enemy.clone())
    else {
        log::error!("enemy construction without game config in context");
        return;
    };

    let placement = build_mesh_collection(registry, entity, &config.model);
    attach_logged(registry, entity, Transform::from_matrix(placement));
    attach_logged(registry, entity, Health::new(config.hitpoints));
    if config.initial_shatter_count > 0 {
        attach_logged(
            registry,
            entity,
            Shatters {
                count: config.initial_shatter_count,
                amount: config.shatter_amount,
            },
        );
    }

    let heading = random_planar_direction(registry);
    attach_logged(registry, entity, Velocity::new(heading * config.speed));
    attach_logged(registry, entity, Collidable);
}

/// A normalized random direction on the X/Z plane
///
/// Each axis keeps a unit minimum magnitude before normalization, so
/// headings never hug an axis or degenerate to zero.
fn random_planar_direction(registry: &mut Registry) -> Vec3 {
    let Some(rng) = registry.ctx_mut().get_mut::<SessionRng>() else {
        log::warn!("no session rng in context; defaulting enemy heading");
        return Vec3::x();
    };

    let mut x: f32 = rng.0.gen_range(-10.0..10.0);
    let mut z: f32 = rng.0.gen_range(-10.0..10.0);
    if x > -1.0 && x <= 0.0 {
        x = -1.0;
    } else if x >= 0.0 && x < 1.0 {
        x = 1.0;
    }
    if z > -1.0 && z <= 0.0 {
        z = -1.0;
    } else if z >= 0.0 && z < 1.0 {
        z = 1.0;
    }

    Vec3::new(x, 0.0, z).normalize()
}
