//! Component trait

/// Marker trait for types stored as entity components
///
/// Components are plain data; behavior lives in systems and in the lifecycle
/// hooks registered on the [`Registry`](crate::ecs::Registry). At most one
/// instance of a component type can be attached to a given entity.
pub trait Component: 'static + Send + Sync {}
