//! # Arena Game
//!
//! The simulation core of a small real-time arena shooter, built on
//! [`arena_engine`]: gameplay components and tags, archetype construction
//! hooks, the per-frame simulation tick with collision response, and the
//! destruction/shatter cascade.
//!
//! The host loop owns windowing, rendering, and raw input; this crate
//! consumes an elapsed-time step and an [`input::InputSnapshot`] per frame
//! through [`session::GameSession::tick`] and produces per-sub-entity
//! [`components::GpuInstance`] data plus a terminal [`session::Outcome`].

pub mod catalog;
pub mod components;
pub mod config;
pub mod input;
pub mod session;
pub mod systems;

pub use catalog::{MeshPrototype, ModelCatalog, ModelPrototype};
pub use config::{GameConfig, InvulnPolicy};
pub use input::InputSnapshot;
pub use session::{DeltaTime, GameSession, Outcome, SessionRng};
