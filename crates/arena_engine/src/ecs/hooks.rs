//! Lifecycle hook table
//!
//! Components gain behavior through callbacks registered against one of three
//! lifecycle stages. Hooks are plain functions registered once at startup
//! into a table keyed by `(component type, stage)`; dispatch copies the hook
//! list first, so a running hook is free to re-enter the registry.

use std::any::TypeId;
use std::collections::HashMap;

use super::{Entity, Registry};

/// Lifecycle callback signature
///
/// Hooks receive the registry and the entity the operation targeted. They may
/// attach, detach, create, and destroy freely; they must not assume any
/// ordering among multiple hooks registered for the same type and stage.
pub type HookFn = fn(&mut Registry, Entity);

/// The lifecycle stage a hook is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookStage {
    /// After a component value is stored (the hook observes the stored value)
    Attach,
    /// On an explicit `notify` of an already-present component
    Update,
    /// Before a component value is removed (the hook still observes it)
    Detach,
}

/// Hook registrations keyed by component type and stage
#[derive(Default)]
pub(crate) struct HookTable {
    table: HashMap<(TypeId, HookStage), Vec<HookFn>>,
}

impl HookTable {
    pub(crate) fn register(&mut self, type_id: TypeId, stage: HookStage, hook: HookFn) {
        self.table.entry((type_id, stage)).or_default().push(hook);
    }

    /// Copy out the hooks for one (type, stage) pair
    ///
    /// Returning an owned list keeps the table borrow out of dispatch, which
    /// is what makes re-entrant registry access from inside a hook legal.
    pub(crate) fn hooks(&self, type_id: TypeId, stage: HookStage) -> Vec<HookFn> {
        self.table
            .get(&(type_id, stage))
            .cloned()
            .unwrap_or_default()
    }
}
