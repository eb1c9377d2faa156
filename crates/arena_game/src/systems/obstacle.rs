//! Obstacle construction
//!
//! Obstacles are static level geometry: a collider and meshes, no velocity,
//! no health. The spawner sets the placement after the tag attach returns
//! (level-file parsing lives outside this core).

use arena_engine::prelude::*;

use crate::components::{Collidable, Transform};
use crate::config::GameConfig;

use super::{attach_logged, build_mesh_collection};

/// Construction hook for the `Obstacle` tag
pub fn construct_obstacle(registry: &mut Registry, entity: Entity) {
    let Some(model) = registry
        .ctx()
        .get::<GameConfig>()
        .map(|config| config.obstacle.model.clone())
    else {
        log::error!("obstacle construction without game config in context");
        return;
    };

    let placement = build_mesh_collection(registry, entity, &model);
    attach_logged(registry, entity, Transform::from_matrix(placement));
    attach_logged(registry, entity, Collidable);
}
