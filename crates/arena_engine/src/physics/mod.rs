//! Collision math
//!
//! Narrow-phase primitives only: the engine deliberately ships no broad-phase
//! or spatial index, since the intended entity populations are small enough
//! for exhaustive pairwise testing.

pub mod obb;

pub use obb::Obb;
