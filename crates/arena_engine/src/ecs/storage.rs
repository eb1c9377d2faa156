//! Per-type sparse component storage

use std::any::Any;
use std::collections::HashMap;

use super::{Component, Entity};

/// Type-erased storage operations the registry needs without knowing `T`
pub(crate) trait AnyStorage: Send + Sync {
    fn contains(&self, entity: Entity) -> bool;
    fn remove(&mut self, entity: Entity) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Sparse map from entity to component value
pub(crate) struct SparseStorage<T: Component> {
    pub(crate) components: HashMap<Entity, T>,
}

impl<T: Component> SparseStorage<T> {
    pub(crate) fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }
}

impl<T: Component> AnyStorage for SparseStorage<T> {
    fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(&entity)
    }

    fn remove(&mut self, entity: Entity) -> bool {
        self.components.remove(&entity).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
