//! Simulation systems
//!
//! Component behavior lives in lifecycle hooks: archetype tags get
//! construction hooks, the player gets a per-frame update hook, the
//! `GameManager` tag's update hook is the tick itself, and `MeshCollection`'s
//! detach hook is the ownership cascade. [`register_component_logic`] wires
//! everything once at session start.

pub mod bullet;
pub mod collision;
pub mod destruction;
pub mod enemy;
pub mod game_manager;
pub mod obstacle;
pub mod player;

use arena_engine::prelude::*;

use crate::catalog::ModelCatalog;
use crate::components::{
    Bullet, Enemy, GameManager, GpuInstance, MeshCollection, Obstacle, Player,
};
use crate::session::DeltaTime;

/// Register every lifecycle hook the simulation uses
///
/// Called once per session, before any entity is spawned.
pub fn register_component_logic(registry: &mut Registry) {
    registry.on_update::<GameManager>(game_manager::update_game_manager);

    registry.on_attach::<Player>(player::construct_player);
    registry.on_update::<Player>(player::update_player);
    registry.on_attach::<Enemy>(enemy::construct_enemy);
    registry.on_attach::<Bullet>(bullet::construct_bullet);
    registry.on_attach::<Obstacle>(obstacle::construct_obstacle);

    registry.on_detach::<MeshCollection>(destruction::cascade_owned_meshes);
}

/// Attach with construction-error logging
///
/// Construction failures abort the affected step but never the session, so
/// hooks funnel their attaches through here instead of propagating.
pub(crate) fn attach_logged<T: Component>(registry: &mut Registry, entity: Entity, value: T) {
    if let Err(err) = registry.attach(entity, value) {
        log::error!(
            "failed to attach {}: {err}",
            std::any::type_name::<T>()
        );
    }
}

/// `attach_or_replace` with the same logging policy as [`attach_logged`]
pub(crate) fn attach_or_replace_logged<T: Component>(
    registry: &mut Registry,
    entity: Entity,
    value: T,
) {
    if let Err(err) = registry.attach_or_replace(entity, value) {
        log::error!(
            "failed to attach {}: {err}",
            std::any::type_name::<T>()
        );
    }
}

/// The current tick's elapsed seconds, or zero outside a tick
pub(crate) fn delta_seconds(registry: &Registry) -> f32 {
    registry
        .ctx()
        .get::<DeltaTime>()
        .map_or(0.0, |dt| dt.seconds)
}

/// Clone a model prototype into freshly created sub-entities on `owner`
///
/// Attaches the owner's `MeshCollection` and returns the archetype's initial
/// placement (the prototype's first mesh transform). A name missing from the
/// catalog degrades to an empty collection with a zero-extent collider and an
/// identity placement rather than failing.
pub(crate) fn build_mesh_collection(
    registry: &mut Registry,
    owner: Entity,
    model_name: &str,
) -> Mat4 {
    let prototype = registry
        .ctx()
        .get::<ModelCatalog>()
        .and_then(|catalog| catalog.model(model_name))
        .cloned();

    let Some(prototype) = prototype else {
        log::warn!("model '{model_name}' missing from catalog; spawning without geometry");
        attach_logged(
            registry,
            owner,
            MeshCollection {
                meshes: Vec::new(),
                collider: Obb::default(),
            },
        );
        return Mat4::identity();
    };

    let mut meshes = Vec::with_capacity(prototype.meshes.len());
    for mesh in &prototype.meshes {
        let sub_entity = registry.create();
        attach_logged(registry, sub_entity, mesh.geometry);
        attach_logged(
            registry,
            sub_entity,
            GpuInstance {
                transform: mesh.transform,
                material: mesh.material,
            },
        );
        meshes.push(sub_entity);
    }

    let placement = prototype
        .meshes
        .first()
        .map_or_else(Mat4::identity, |mesh| mesh.transform);

    attach_logged(
        registry,
        owner,
        MeshCollection {
            meshes,
            collider: prototype.collider,
        },
    );
    placement
}
