//! Entity identity

use slotmap::new_key_type;

new_key_type! {
    /// Generational entity identifier
    ///
    /// An `Entity` carries no data of its own; it is a key into the
    /// [`Registry`](crate::ecs::Registry)'s storages. Keys are generational:
    /// once an entity is destroyed its identity never matches a live entity
    /// again, even if the slot is reused.
    pub struct Entity;
}
