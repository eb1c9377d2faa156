//! Game configuration
//!
//! Typed sections replace ad-hoc `section.key` lookups: a tunable missing
//! from a config file fails deserialization at load time, before any
//! archetype tries to construct with it. Defaults exist so the demo binary
//! and tests can run without a file on disk.

use arena_engine::config::{Config, Deserialize, Serialize};

/// All gameplay tunables, one section per archetype
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player settings
    pub player: PlayerConfig,

    /// Enemy settings
    pub enemy: EnemyConfig,

    /// Bullet settings
    pub bullet: BulletConfig,

    /// Obstacle settings
    pub obstacle: ObstacleConfig,
}

impl Config for GameConfig {}

/// Player tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Starting hit points
    pub hitpoints: f32,

    /// Movement speed in world units per second
    pub speed: f32,

    /// Seconds between shots
    pub firerate: f32,

    /// Seconds of immunity after taking a hit
    pub invuln_period: f32,

    /// What an overlapping hit does to an already-running immunity window
    pub invuln_policy: InvulnPolicy,

    /// Model catalog name
    pub model: String,
}

/// Behavior of hits landing inside an active invulnerability window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvulnPolicy {
    /// The hit is ignored entirely; the running timer is untouched
    #[default]
    Ignore,

    /// The hit deals no damage but refreshes the timer to its full duration
    Reset,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            hitpoints: 3.0,
            speed: 8.0,
            firerate: 0.25,
            invuln_period: 1.5,
            invuln_policy: InvulnPolicy::Ignore,
            model: "player".to_string(),
        }
    }
}

/// Enemy tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Starting hit points
    pub hitpoints: f32,

    /// Movement speed in world units per second
    pub speed: f32,

    /// Fragmentation generations below a freshly spawned enemy
    pub initial_shatter_count: u32,

    /// Fragments spawned per split
    pub shatter_amount: u32,

    /// Uniform scale-down applied to each fragment
    pub shatter_scale: f32,

    /// Model catalog name
    pub model: String,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            hitpoints: 2.0,
            speed: 5.0,
            initial_shatter_count: 2,
            shatter_amount: 2,
            shatter_scale: 0.75,
            model: "enemy".to_string(),
        }
    }
}

/// Bullet tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletConfig {
    /// Flight speed in world units per second
    pub speed: f32,

    /// Model catalog name
    pub model: String,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 20.0,
            model: "bullet".to_string(),
        }
    }
}

/// Obstacle tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleConfig {
    /// Model catalog name
    pub model: String,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            model: "wall".to_string(),
        }
    }
}
