//! Collision detection and response
//!
//! Brute-force pairwise oriented-box testing over every collidable entity,
//! rebuilt from scratch each tick; no caching, no spatial index. O(n²) in the
//! collidable count, sized for populations in the tens.

use arena_engine::prelude::*;

use crate::components::{
    Bullet, Collidable, Enemy, Health, Invulnerability, MeshCollection, Obstacle, Player,
    ToDestroy, Transform, Velocity,
};
use crate::config::{GameConfig, InvulnPolicy};

use super::{attach_logged, attach_or_replace_logged};

const PLANAR_EPSILON: f32 = 1e-6;

/// Derive the world-space collider for every collidable entity
///
/// Scales the local box's half-extents by the transform's per-axis scale,
/// maps its center through the full matrix, and composes the transform's
/// rotation onto the box orientation.
#[must_use]
pub fn world_colliders(registry: &Registry) -> Vec<(Entity, Obb)> {
    let mut colliders = Vec::new();
    for entity in registry.view::<(Collidable, MeshCollection, Transform)>() {
        let Some(local) = registry
            .try_get::<MeshCollection>(entity)
            .map(|collection| collection.collider)
        else {
            continue;
        };
        let Some(matrix) = registry.try_get::<Transform>(entity).map(|t| t.matrix) else {
            continue;
        };
        colliders.push((entity, local.transformed(&matrix)));
    }
    colliders
}

/// Test every unordered collidable pair once and apply the response table
///
/// The response table is checked symmetrically: iteration order assigns the
/// outer/inner roles, not gameplay semantics, so each hit dispatches with the
/// roles both ways. Multiple effects on one entity in one tick compose;
/// `ToDestroy` marking is idempotent.
pub fn resolve_collisions(registry: &mut Registry) {
    let colliders = world_colliders(registry);
    for i in 0..colliders.len() {
        for j in (i + 1)..colliders.len() {
            let (entity_a, box_a) = colliders[i];
            let (entity_b, box_b) = colliders[j];
            if box_a.intersects(&box_b) {
                respond(registry, entity_a, entity_b, &box_b);
                respond(registry, entity_b, entity_a, &box_a);
            }
        }
    }
}

/// Apply every response rule with `actor` in the first role
fn respond(registry: &mut Registry, actor: Entity, other: Entity, other_box: &Obb) {
    // Bullet hits a wall: the bullet dies
    if registry.has::<Bullet>(actor) && registry.has::<Obstacle>(other) {
        mark_to_destroy(registry, actor);
    }

    // Bullet hits an enemy: the bullet dies, the enemy takes a point
    if registry.has::<Bullet>(actor) && registry.has::<Enemy>(other) {
        mark_to_destroy(registry, actor);
        if let Some(health) = registry.try_get_mut::<Health>(other) {
            health.take_damage(1.0);
        }
    }

    // Enemy hits a wall: bounce
    if registry.has::<Enemy>(actor) && registry.has::<Obstacle>(other) {
        bounce_off(registry, actor, other_box);
    }

    // Enemy hits a player: damage through the invulnerability gate
    if registry.has::<Enemy>(actor) && registry.has::<Player>(other) {
        damage_player(registry, other);
    }
}

/// Idempotently mark an entity for this tick's destruction sweep
pub(crate) fn mark_to_destroy(registry: &mut Registry, entity: Entity) {
    attach_or_replace_logged(registry, entity, ToDestroy);
}

/// Reflect an enemy's velocity off an obstacle's box
///
/// The outward normal is the enemy position minus its closest point on the
/// box, flattened onto the horizontal plane. An enemy whose center sits
/// inside the box footprint has no usable normal; the bounce is skipped.
fn bounce_off(registry: &mut Registry, enemy: Entity, obstacle_box: &Obb) {
    let Some(position) = registry.try_get::<Transform>(enemy).map(Transform::translation) else {
        return;
    };
    let closest = obstacle_box.closest_point(position);
    let mut normal = position - closest;
    normal.y = 0.0;
    if normal.magnitude_squared() < PLANAR_EPSILON {
        return;
    }
    let normal = normal.normalize();

    if let Some(velocity) = registry.try_get_mut::<Velocity>(enemy) {
        // v' = v - 2 (v . n) n
        let v = velocity.linear;
        velocity.linear = v - normal * (2.0 * v.dot(&normal));
    }
}

/// Apply one point of contact damage to a player
///
/// An active invulnerability window gates the hit: under the `Ignore` policy
/// the hit does nothing at all, under `Reset` it refreshes the window to its
/// full duration. A fresh hit decrements health and opens a new window.
fn damage_player(registry: &mut Registry, player: Entity) {
    let Some((duration, policy)) = registry
        .ctx()
        .get::<GameConfig>()
        .map(|config| (config.player.invuln_period, config.player.invuln_policy))
    else {
        log::error!("player damage without game config in context");
        return;
    };

    if registry.has::<Invulnerability>(player) {
        if policy == InvulnPolicy::Reset {
            if let Some(window) = registry.try_get_mut::<Invulnerability>(player) {
                window.remaining = window.duration;
            }
        }
        return;
    }

    let Some(health) = registry.try_get_mut::<Health>(player) else {
        return;
    };
    health.take_damage(1.0);
    log::info!("player hit; {} hit points left", health.value);

    attach_logged(registry, player, Invulnerability::new(duration));
}
