//! Game-specific components and tags

use arena_engine::prelude::*;

/// World transform component
///
/// The single source of truth for an entity's placement; integration writes
/// it, instance propagation and collision derivation read it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Column-major world matrix
    pub matrix: Mat4,
}

impl Component for Transform {}

impl Transform {
    /// Identity placement at the origin
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::identity(),
        }
    }

    /// Wrap an existing world matrix
    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// The world-space position
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.matrix.translation_part()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Velocity component for physics integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// Linear velocity in world units per second
    pub linear: Vec3,
}

impl Component for Velocity {}

impl Velocity {
    /// Create a velocity from a linear vector
    #[must_use]
    pub fn new(linear: Vec3) -> Self {
        Self { linear }
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self {
            linear: Vec3::zeros(),
        }
    }
}

/// Health component
///
/// Damage is deliberately unclamped; only the sign matters, and the death
/// pass treats anything at or below zero as dead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    /// Current hit points
    pub value: f32,
}

impl Component for Health {}

impl Health {
    /// Create a health pool with the given starting hit points
    #[must_use]
    pub fn new(hitpoints: f32) -> Self {
        Self { value: hitpoints }
    }

    /// Take damage
    pub fn take_damage(&mut self, amount: f32) {
        self.value -= amount;
    }

    /// Check if dead
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.value <= 0.0
    }
}

/// Ownership record over an entity's renderable sub-entities plus its
/// local-space collision shape
///
/// The listed sub-entities belong exclusively to this entity: destroying the
/// owner destroys them (with a self-reference guard in the cascade). No
/// sub-entity may appear in two collections.
#[derive(Debug, Clone)]
pub struct MeshCollection {
    /// Owned renderable sub-entities, in draw order
    pub meshes: Vec<Entity>,
    /// Collision shape in local space
    pub collider: Obb,
}

impl Component for MeshCollection {}

/// Remaining fragmentation state for an enemy
///
/// Present only while the entity is still eligible to fragment; the count is
/// strictly decreasing down a lineage and the component is removed once it
/// reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shatters {
    /// Fragmentation generations left below this entity
    pub count: u32,
    /// Fragments spawned per split
    pub amount: u32,
}

impl Component for Shatters {}

/// Cooldown gating the fire capability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Firing {
    /// Seconds until firing is possible again
    pub remaining: f32,
    /// Full cooldown duration
    pub duration: f32,
}

impl Component for Firing {}

impl Firing {
    /// Start a fresh cooldown
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
            duration,
        }
    }
}

/// Damage immunity window on a player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invulnerability {
    /// Seconds of immunity left
    pub remaining: f32,
    /// Full window duration
    pub duration: f32,
}

impl Component for Invulnerability {}

impl Invulnerability {
    /// Start a fresh immunity window
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
            duration,
        }
    }
}

/// Index/vertex ranges locating a sub-mesh in the renderer's buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryData {
    /// First vertex in the shared vertex buffer
    pub vertex_start: u32,
    /// First index in the shared index buffer
    pub index_start: u32,
    /// Number of indices to draw
    pub index_count: u32,
}

impl Component for GeometryData {}

/// Material parameters handed to the renderer per instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialData {
    /// Diffuse RGBA color
    pub diffuse: [f32; 4],
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            diffuse: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Per-instance data the rendering collaborator consumes on its own schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuInstance {
    /// Instance world transform, refreshed by propagation each tick
    pub transform: Mat4,
    /// Material reference
    pub material: MaterialData,
}

impl Component for GpuInstance {}

// --- Tags -------------------------------------------------------------------

/// Tag: player-controlled entity
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;
impl Component for Player {}

/// Tag: hostile entity
#[derive(Debug, Clone, Copy, Default)]
pub struct Enemy;
impl Component for Enemy {}

/// Tag: projectile
#[derive(Debug, Clone, Copy, Default)]
pub struct Bullet;
impl Component for Bullet {}

/// Tag: static level geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct Obstacle;
impl Component for Obstacle {}

/// Tag: participates in collision detection
#[derive(Debug, Clone, Copy, Default)]
pub struct Collidable;
impl Component for Collidable {}

/// Tag: the session has ended (carried by the manager entity)
#[derive(Debug, Clone, Copy, Default)]
pub struct GameOver;
impl Component for GameOver {}

/// Tag: marked for destruction by this tick's sweep
///
/// Transient: attached during a tick and consumed by the sweep before the
/// tick ends; never carried across two ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToDestroy;
impl Component for ToDestroy {}

/// Tag: the singleton entity whose explicit update drives the tick
#[derive(Debug, Clone, Copy, Default)]
pub struct GameManager;
impl Component for GameManager {}
