//! Type-keyed context store for session singletons
//!
//! Holds values that belong to the simulation session as a whole rather than
//! to any entity: configuration, the per-tick elapsed time, the current input
//! snapshot, shared catalogs. One instance per type, created once at session
//! start and torn down with the owning registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Table of singleton values addressed purely by type
#[derive(Default)]
pub struct Context {
    slots: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Context {
    /// Create an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a singleton, returning the previously stored value if any
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> Option<T> {
        self.slots
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Look up the singleton of type `T`
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_ref())
    }

    /// Look up the singleton of type `T` for mutation
    pub fn get_mut<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_mut())
    }

    /// Look up the singleton of type `T`, creating it from `Default` first
    /// when absent
    pub fn get_or_default<T: Any + Send + Sync + Default>(&mut self) -> &mut T {
        self.slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::<T>::default())
            .downcast_mut()
            .expect("context slot keyed by TypeId")
    }

    /// Remove and return the singleton of type `T`
    pub fn remove<T: Any + Send + Sync>(&mut self) -> Option<T> {
        self.slots
            .remove(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Check whether a singleton of type `T` is present
    #[must_use]
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }
}
