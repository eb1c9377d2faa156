//! Component-set predicates for view iteration
//!
//! A view filters the live entity set down to those holding every component
//! in a tuple. Implemented for 1- to 3-element tuples, which covers the
//! simulation's needs; larger filters compose by checking `has` inside the
//! loop body.

use super::{Component, Entity, Registry};

/// Predicate over an entity's component set
///
/// Implemented for tuples of component types; an entity matches when it holds
/// every listed type.
pub trait ComponentSet {
    /// Does `entity` hold every component in this set?
    fn matches(registry: &Registry, entity: Entity) -> bool;
}

impl<A: Component> ComponentSet for (A,) {
    fn matches(registry: &Registry, entity: Entity) -> bool {
        registry.has::<A>(entity)
    }
}

impl<A: Component, B: Component> ComponentSet for (A, B) {
    fn matches(registry: &Registry, entity: Entity) -> bool {
        registry.has::<A>(entity) && registry.has::<B>(entity)
    }
}

impl<A: Component, B: Component, C: Component> ComponentSet for (A, B, C) {
    fn matches(registry: &Registry, entity: Entity) -> bool {
        registry.has::<A>(entity) && registry.has::<B>(entity) && registry.has::<C>(entity)
    }
}
