//! The component registry
//!
//! One `Registry` owns every entity identity, every component value, the
//! lifecycle hook table, and the session context for a single simulation
//! session. All access is single-threaded; hooks dispatch synchronously and
//! may re-enter the registry from within their own call stack.

use std::any::{type_name, TypeId};
use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;
use thiserror::Error;

use super::storage::{AnyStorage, SparseStorage};
use super::{Component, ComponentSet, Context, Entity, HookFn, HookStage};
use crate::ecs::hooks::HookTable;

/// Errors from checked registry operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// The target entity has been destroyed (or never existed)
    #[error("entity is not alive")]
    DeadEntity,

    /// `attach` on a component type the entity already holds
    #[error("component {component} already attached")]
    AlreadyPresent {
        /// Name of the offending component type
        component: &'static str,
    },

    /// Checked lookup of a component the entity does not hold
    #[error("component {component} missing")]
    Missing {
        /// Name of the requested component type
        component: &'static str,
    },
}

/// Entity, component, hook, and context storage for one session
#[derive(Default)]
pub struct Registry {
    entities: SlotMap<Entity, ()>,
    storages: HashMap<TypeId, Box<dyn AnyStorage>>,
    hooks: HookTable,
    /// Entities currently inside `destroy`; guards the cascade against
    /// re-entrant double-destruction of the same identity
    dying: HashSet<Entity>,
    ctx: Context,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity with no components
    pub fn create(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Is this identity still valid?
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Session context singletons
    #[must_use]
    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    /// Session context singletons, mutable
    pub fn ctx_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    // --- hook registration ---------------------------------------------------

    /// Register a hook to run after `T` is attached to any entity
    pub fn on_attach<T: Component>(&mut self, hook: HookFn) {
        self.hooks.register(TypeId::of::<T>(), HookStage::Attach, hook);
    }

    /// Register a hook to run when `T` is explicitly notified on an entity
    pub fn on_update<T: Component>(&mut self, hook: HookFn) {
        self.hooks.register(TypeId::of::<T>(), HookStage::Update, hook);
    }

    /// Register a hook to run before `T` is detached from any entity
    pub fn on_detach<T: Component>(&mut self, hook: HookFn) {
        self.hooks.register(TypeId::of::<T>(), HookStage::Detach, hook);
    }

    // --- component operations ------------------------------------------------

    /// Attach a component to an entity
    ///
    /// Fails if the entity is dead or already holds a `T`. On success the
    /// value is stored first and every `on_attach` hook for `T` then runs,
    /// observing the fully stored state.
    ///
    /// # Errors
    ///
    /// [`EcsError::DeadEntity`] or [`EcsError::AlreadyPresent`].
    pub fn attach<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::DeadEntity);
        }
        let storage = self.storage_mut::<T>();
        if storage.components.contains_key(&entity) {
            return Err(EcsError::AlreadyPresent {
                component: type_name::<T>(),
            });
        }
        storage.components.insert(entity, value);
        self.run_hooks(TypeId::of::<T>(), HookStage::Attach, entity);
        Ok(())
    }

    /// Attach a component, overwriting any existing value
    ///
    /// Idempotent marking operation: `on_attach` hooks fire only when the
    /// component was newly inserted, never on overwrite.
    ///
    /// # Errors
    ///
    /// [`EcsError::DeadEntity`].
    pub fn attach_or_replace<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<(), EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::DeadEntity);
        }
        let storage = self.storage_mut::<T>();
        let fresh = storage.components.insert(entity, value).is_none();
        if fresh {
            self.run_hooks(TypeId::of::<T>(), HookStage::Attach, entity);
        }
        Ok(())
    }

    /// Checked component lookup
    ///
    /// # Errors
    ///
    /// [`EcsError::Missing`] when the entity does not hold a `T`.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.try_get::<T>(entity).ok_or(EcsError::Missing {
            component: type_name::<T>(),
        })
    }

    /// Checked mutable component lookup
    ///
    /// # Errors
    ///
    /// [`EcsError::Missing`] when the entity does not hold a `T`.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.try_get_mut::<T>(entity).ok_or(EcsError::Missing {
            component: type_name::<T>(),
        })
    }

    /// Component lookup returning `None` on absence
    #[must_use]
    pub fn try_get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.components.get(&entity)
    }

    /// Mutable component lookup returning `None` on absence
    pub fn try_get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<SparseStorage<T>>()?
            .components
            .get_mut(&entity)
    }

    /// Does the entity hold a `T`?
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>()
            .is_some_and(|storage| storage.components.contains_key(&entity))
    }

    /// Detach a component from an entity
    ///
    /// `on_detach` hooks fire before the value is removed, so they still
    /// observe it. Returns `false` (a no-op) when the component is absent.
    pub fn detach<T: Component>(&mut self, entity: Entity) -> bool {
        if !self.has::<T>(entity) {
            return false;
        }
        self.run_hooks(TypeId::of::<T>(), HookStage::Detach, entity);
        // A hook may already have removed it; either way it is gone now.
        if let Some(storage) = self.storages.get_mut(&TypeId::of::<T>()) {
            storage.remove(entity);
        }
        true
    }

    /// Explicitly notify an already-present component
    ///
    /// Runs every `on_update` hook for `T` on this entity. Does nothing when
    /// the entity does not hold a `T`; this is the only path that runs update
    /// hooks.
    pub fn notify<T: Component>(&mut self, entity: Entity) {
        if self.has::<T>(entity) {
            self.run_hooks(TypeId::of::<T>(), HookStage::Update, entity);
        }
    }

    /// Destroy an entity and every component it holds
    ///
    /// Two-phase: the entity is first marked as dying, so a re-entrant
    /// `destroy` of the same identity from inside a detach hook is a no-op.
    /// Every component present then has its `on_detach` hooks fired and is
    /// removed, and finally the identity is invalidated. Destroying a dead
    /// entity is a no-op.
    pub fn destroy(&mut self, entity: Entity) {
        if !self.is_alive(entity) || self.dying.contains(&entity) {
            return;
        }
        self.dying.insert(entity);

        let present: Vec<TypeId> = self
            .storages
            .iter()
            .filter(|(_, storage)| storage.contains(entity))
            .map(|(type_id, _)| *type_id)
            .collect();
        for type_id in present {
            for hook in self.hooks.hooks(type_id, HookStage::Detach) {
                hook(self, entity);
            }
            if let Some(storage) = self.storages.get_mut(&type_id) {
                storage.remove(entity);
            }
        }

        self.entities.remove(entity);
        // A detach hook may have attached fresh components to the dying
        // entity mid-cascade; purge any stragglers so the dead identity
        // reads back nothing.
        for storage in self.storages.values_mut() {
            storage.remove(entity);
        }
        self.dying.remove(&entity);
    }

    /// Snapshot of the entities holding every component in `S`
    ///
    /// The result is sorted by entity key, giving a stable ordering across a
    /// tick, and is a snapshot: structural attach/detach of the filtered
    /// types during iteration cannot invalidate it. Brute force over the live
    /// set; intended for populations in the tens.
    #[must_use]
    pub fn view<S: ComponentSet>(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .entities
            .keys()
            .filter(|entity| S::matches(self, *entity))
            .collect();
        entities.sort_unstable();
        entities
    }

    // --- internals -----------------------------------------------------------

    fn run_hooks(&mut self, type_id: TypeId, stage: HookStage, entity: Entity) {
        for hook in self.hooks.hooks(type_id, stage) {
            hook(self, entity);
        }
    }

    fn storage<T: Component>(&self) -> Option<&SparseStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref())
    }

    fn storage_mut<T: Component>(&mut self) -> &mut SparseStorage<T> {
        self.storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut()
            .expect("storage map keyed by TypeId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Position(f32);
    impl Component for Position {}

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Speed(f32);
    impl Component for Speed {}

    #[derive(Debug, Clone, Copy)]
    struct Marker;
    impl Component for Marker {}

    /// Counts hook invocations through the context store, since hooks are
    /// plain fns and cannot capture.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct HookLog {
        attached: u32,
        updated: u32,
        detached: u32,
        observed_value: Option<i32>,
    }

    #[derive(Debug, Clone, Copy)]
    struct Tracked(i32);
    impl Component for Tracked {}

    fn log_attach(registry: &mut Registry, entity: Entity) {
        let value = registry.try_get::<Tracked>(entity).map(|t| t.0);
        let log = registry.ctx_mut().get_or_default::<HookLog>();
        log.attached += 1;
        log.observed_value = value;
    }

    fn log_update(registry: &mut Registry, _entity: Entity) {
        registry.ctx_mut().get_or_default::<HookLog>().updated += 1;
    }

    fn log_detach(registry: &mut Registry, entity: Entity) {
        let value = registry.try_get::<Tracked>(entity).map(|t| t.0);
        let log = registry.ctx_mut().get_or_default::<HookLog>();
        log.detached += 1;
        log.observed_value = value;
    }

    #[test]
    fn attach_get_detach_round_trip() {
        let mut registry = Registry::new();
        let entity = registry.create();

        registry.attach(entity, Position(2.0)).unwrap();
        assert!(registry.has::<Position>(entity));
        assert_eq!(registry.get::<Position>(entity).unwrap(), &Position(2.0));

        assert!(registry.detach::<Position>(entity));
        assert!(!registry.has::<Position>(entity));
        assert!(!registry.detach::<Position>(entity));
        assert_eq!(
            registry.get::<Position>(entity),
            Err(EcsError::Missing {
                component: std::any::type_name::<Position>()
            })
        );
    }

    #[test]
    fn duplicate_attach_is_an_error() {
        let mut registry = Registry::new();
        let entity = registry.create();

        registry.attach(entity, Position(1.0)).unwrap();
        assert!(matches!(
            registry.attach(entity, Position(2.0)),
            Err(EcsError::AlreadyPresent { .. })
        ));
        // The original value survives a failed attach
        assert_eq!(registry.get::<Position>(entity).unwrap(), &Position(1.0));
    }

    #[test]
    fn attach_to_dead_entity_fails() {
        let mut registry = Registry::new();
        let entity = registry.create();
        registry.destroy(entity);
        assert_eq!(
            registry.attach(entity, Position(0.0)),
            Err(EcsError::DeadEntity)
        );
    }

    #[test]
    fn attach_or_replace_overwrites_without_hooks() {
        let mut registry = Registry::new();
        registry.on_attach::<Tracked>(log_attach);
        let entity = registry.create();

        registry.attach_or_replace(entity, Tracked(1)).unwrap();
        registry.attach_or_replace(entity, Tracked(2)).unwrap();

        assert_eq!(registry.try_get::<Tracked>(entity).unwrap().0, 2);
        assert_eq!(registry.ctx().get::<HookLog>().unwrap().attached, 1);
    }

    #[test]
    fn attach_hook_observes_stored_value() {
        let mut registry = Registry::new();
        registry.on_attach::<Tracked>(log_attach);
        let entity = registry.create();

        registry.attach(entity, Tracked(7)).unwrap();

        let log = registry.ctx().get::<HookLog>().unwrap();
        assert_eq!(log.attached, 1);
        assert_eq!(log.observed_value, Some(7));
    }

    #[test]
    fn detach_hook_still_observes_value() {
        let mut registry = Registry::new();
        registry.on_detach::<Tracked>(log_detach);
        let entity = registry.create();
        registry.attach(entity, Tracked(11)).unwrap();

        registry.detach::<Tracked>(entity);

        let log = registry.ctx().get::<HookLog>().unwrap();
        assert_eq!(log.detached, 1);
        assert_eq!(log.observed_value, Some(11));
    }

    #[test]
    fn notify_requires_presence() {
        let mut registry = Registry::new();
        registry.on_update::<Tracked>(log_update);
        let entity = registry.create();

        registry.notify::<Tracked>(entity);
        assert!(registry.ctx().get::<HookLog>().is_none());

        registry.attach(entity, Tracked(0)).unwrap();
        registry.notify::<Tracked>(entity);
        registry.notify::<Tracked>(entity);
        assert_eq!(registry.ctx().get::<HookLog>().unwrap().updated, 2);
    }

    fn chain_attach(registry: &mut Registry, entity: Entity) {
        // Re-entrant structural mutation from inside a hook
        let _ = registry.attach(entity, Marker);
    }

    #[test]
    fn hooks_may_reenter_the_registry() {
        let mut registry = Registry::new();
        registry.on_attach::<Tracked>(chain_attach);
        let entity = registry.create();

        registry.attach(entity, Tracked(1)).unwrap();
        assert!(registry.has::<Marker>(entity));
    }

    fn destroy_self(registry: &mut Registry, entity: Entity) {
        // A detach hook that re-enters destroy on its own entity must not loop
        registry.destroy(entity);
    }

    #[test]
    fn reentrant_destroy_terminates() {
        let mut registry = Registry::new();
        registry.on_detach::<Marker>(destroy_self);
        let entity = registry.create();
        registry.attach(entity, Marker).unwrap();

        registry.destroy(entity);
        assert!(!registry.is_alive(entity));
        assert_eq!(registry.entity_count(), 0);
    }

    fn attach_during_teardown(registry: &mut Registry, entity: Entity) {
        let _ = registry.attach(entity, Position(9.0));
    }

    #[test]
    fn components_attached_mid_destroy_do_not_outlive_the_entity() {
        let mut registry = Registry::new();
        registry.on_detach::<Marker>(attach_during_teardown);
        let entity = registry.create();
        registry.attach(entity, Marker).unwrap();

        registry.destroy(entity);

        assert!(!registry.is_alive(entity));
        assert!(registry.try_get::<Position>(entity).is_none());
    }

    #[test]
    fn destroy_removes_all_components_and_fires_detach() {
        let mut registry = Registry::new();
        registry.on_detach::<Tracked>(log_detach);
        let entity = registry.create();
        registry.attach(entity, Tracked(5)).unwrap();
        registry.attach(entity, Position(1.0)).unwrap();

        registry.destroy(entity);

        assert!(!registry.is_alive(entity));
        assert_eq!(registry.ctx().get::<HookLog>().unwrap().detached, 1);
        // A stale identity never reads back data
        assert!(registry.try_get::<Position>(entity).is_none());
    }

    #[test]
    fn destroyed_identity_does_not_alias_new_entities() {
        let mut registry = Registry::new();
        let first = registry.create();
        registry.attach(first, Position(1.0)).unwrap();
        registry.destroy(first);

        let second = registry.create();
        registry.attach(second, Position(2.0)).unwrap();

        assert_ne!(first, second);
        assert!(!registry.is_alive(first));
        assert!(registry.try_get::<Position>(first).is_none());
    }

    #[test]
    fn views_filter_by_component_set() {
        let mut registry = Registry::new();
        let both = registry.create();
        let only_position = registry.create();
        let neither = registry.create();

        registry.attach(both, Position(0.0)).unwrap();
        registry.attach(both, Speed(1.0)).unwrap();
        registry.attach(only_position, Position(0.0)).unwrap();

        let view = registry.view::<(Position, Speed)>();
        assert_eq!(view, vec![both]);

        let positions = registry.view::<(Position,)>();
        assert_eq!(positions.len(), 2);
        assert!(!positions.contains(&neither));
    }

    #[test]
    fn view_order_is_stable_across_calls() {
        let mut registry = Registry::new();
        for _ in 0..8 {
            let entity = registry.create();
            registry.attach(entity, Position(0.0)).unwrap();
        }
        let first = registry.view::<(Position,)>();
        let second = registry.view::<(Position,)>();
        assert_eq!(first, second);
    }
}
