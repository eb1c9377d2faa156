//! Per-tick input snapshot
//!
//! The host samples its input devices once per frame and hands the result to
//! the tick; nothing inside the simulation re-samples mid-tick. Directions
//! are analog (`0.0..=1.0`) so both keyboards and sticks map onto them.

use arena_engine::prelude::*;

/// Directional input state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Strafe left
    pub move_left: f32,
    /// Strafe right
    pub move_right: f32,
    /// Move forward (+Z)
    pub move_forward: f32,
    /// Move backward (-Z)
    pub move_back: f32,

    /// Fire toward -X
    pub fire_left: f32,
    /// Fire toward +X
    pub fire_right: f32,
    /// Fire toward +Z
    pub fire_up: f32,
    /// Fire toward -Z
    pub fire_down: f32,
}

impl InputSnapshot {
    /// Signed movement direction on the X/Z plane (not normalized)
    #[must_use]
    pub fn move_direction(&self) -> Vec3 {
        Vec3::new(
            self.move_right - self.move_left,
            0.0,
            self.move_forward - self.move_back,
        )
    }

    /// Signed firing direction on the X/Z plane (not normalized)
    #[must_use]
    pub fn fire_direction(&self) -> Vec3 {
        Vec3::new(
            self.fire_right - self.fire_left,
            0.0,
            self.fire_up - self.fire_down,
        )
    }
}
