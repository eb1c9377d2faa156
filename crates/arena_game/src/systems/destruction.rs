//! Death resolution, shatter fragmentation, and the destruction sweep
//!
//! Destruction is deferred: collision response and the death pass only mark
//! entities with `ToDestroy`, and a single sweep at the end of the tick
//! destroys everything marked. The `MeshCollection` detach hook cascades
//! destruction to owned sub-entities.

use arena_engine::prelude::*;

use crate::components::{Enemy, Health, MeshCollection, Shatters, Transform};
use crate::config::GameConfig;

use super::{attach_logged, attach_or_replace_logged, collision};

/// Mark dead enemies and spawn their shatter fragments
///
/// Works over a snapshot of the `(Health, Enemy)` view, so fragments spawned
/// here are not re-examined until the next tick. Fragments go through full
/// enemy construction first; the lineage state (parent placement scaled down,
/// decremented shatter count) overwrites the constructed defaults afterward.
pub fn resolve_deaths(registry: &mut Registry) {
    for enemy in registry.view::<(Health, Enemy)>() {
        let Some(health) = registry.try_get::<Health>(enemy).map(|h| h.value) else {
            continue;
        };
        if health > 0.0 {
            continue;
        }

        collision::mark_to_destroy(registry, enemy);

        let Some(shatters) = registry.try_get::<Shatters>(enemy).copied() else {
            continue;
        };
        if shatters.count > 0 {
            spawn_fragments(registry, enemy, shatters);
        }
    }
}

fn spawn_fragments(registry: &mut Registry, parent: Entity, shatters: Shatters) {
    let Some(scale) = registry
        .ctx()
        .get::<GameConfig>()
        .map(|config| config.enemy.shatter_scale)
    else {
        log::error!("shatter without game config in context");
        return;
    };
    let Some(parent_matrix) = registry.try_get::<Transform>(parent).map(|t| t.matrix) else {
        log::warn!("shattering enemy has no transform; skipping fragments");
        return;
    };

    let child_count = shatters.count - 1;
    for _ in 0..shatters.amount {
        let fragment = registry.create();
        attach_logged(registry, fragment, Enemy);

        if let Some(transform) = registry.try_get_mut::<Transform>(fragment) {
            transform.matrix = parent_matrix.scaled_local(scale);
        }
        if child_count == 0 {
            // The lineage ends here; eligibility leaves with the component
            registry.detach::<Shatters>(fragment);
        } else {
            attach_or_replace_logged(
                registry,
                fragment,
                Shatters {
                    count: child_count,
                    amount: shatters.amount,
                },
            );
        }
    }
}

/// Destroy every entity marked `ToDestroy`
///
/// Consumes the marks: nothing carries `ToDestroy` across ticks, and running
/// the sweep twice in a row is a no-op the second time.
pub fn sweep_marked(registry: &mut Registry) {
    for entity in registry.view::<(crate::components::ToDestroy,)>() {
        registry.destroy(entity);
    }
}

/// Ownership cascade, registered as `MeshCollection`'s detach hook
///
/// Two-phase: take the owned list out of the component first (clearing it on
/// the owner), then destroy each listed sub-entity. A collection listing its
/// own owner skips that entry instead of re-entering the owner's destruction.
pub fn cascade_owned_meshes(registry: &mut Registry, owner: Entity) {
    let Some(meshes) = registry
        .try_get_mut::<MeshCollection>(owner)
        .map(|collection| std::mem::take(&mut collection.meshes))
    else {
        return;
    };
    for mesh in meshes {
        if mesh == owner {
            continue;
        }
        registry.destroy(mesh);
    }
}
