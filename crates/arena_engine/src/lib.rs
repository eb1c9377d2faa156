//! # Arena Engine
//!
//! A small entity-component runtime for single-threaded simulations.
//!
//! ## Features
//!
//! - **Registry**: sparse, typed component storage with checked and
//!   absence-tolerant lookups, snapshot views, and generational entity keys
//! - **Lifecycle Hooks**: plain-function callbacks bound to component
//!   attach / explicit-update / detach, with re-entrant dispatch
//! - **Context Store**: type-keyed singletons scoped to one session
//! - **Collision Math**: oriented-bounding-box intersection and queries
//! - **Configuration**: TOML/RON file loading behind a single trait
//!
//! ## Quick Start
//!
//! ```
//! use arena_engine::prelude::*;
//!
//! #[derive(Debug, Clone, Copy)]
//! struct Position(f32);
//! impl Component for Position {}
//!
//! let mut registry = Registry::new();
//! let entity = registry.create();
//! registry.attach(entity, Position(1.0)).unwrap();
//! assert!(registry.has::<Position>(entity));
//! ```

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        ecs::{Component, Context, EcsError, Entity, HookStage, Registry},
        foundation::math::{Mat4, Mat4Ext, Quat, Vec3},
        physics::Obb,
    };
}
