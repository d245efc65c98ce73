//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//!
//! Cross-entity references use stable player ids and slot indices, never
//! raw entity handles, so snapshots and events stay serializable.

use serde::{Deserialize, Serialize};

use crate::enums::{PowerUpKind, Team};

/// Marks an entity as a player-controlled tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tank;

/// Identity and running score of the player driving a tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Stable id assigned at join, unique for the match.
    pub player_id: u32,
    pub name: String,
    pub team: Team,
    pub kills: u32,
    pub deaths: u32,
}

/// Hull integrity. A tank with `current == 0` is destroyed and waiting
/// to respawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// Turret orientation. `yaw` slews toward `desired_yaw` each tick.
/// Radians, 0 = North, clockwise.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Turret {
    pub yaw: f64,
    pub desired_yaw: f64,
}

/// The turret's field of view used by the perception system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SightCone {
    /// Half-angle of the cone (radians).
    pub half_angle: f64,
    /// Maximum detection range (meters).
    pub range: f64,
}

/// Timed effect state granted by power-ups.
///
/// The `*_until_tick` deadlines let a scheduled expiry recognize that the
/// effect was re-granted after it was scheduled: a stale expiry whose
/// deadline is already in the past against the stored tick is a no-op.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Incoming damage is absorbed entirely while true.
    pub shield: bool,
    pub shield_until_tick: u64,
    /// Multiplier on outgoing damage.
    pub damage_factor: f64,
    pub damage_until_tick: u64,
    /// Multiplier on top speed.
    pub speed_factor: f64,
    pub speed_until_tick: u64,
}

impl Default for ActiveEffects {
    fn default() -> Self {
        Self {
            shield: false,
            shield_until_tick: 0,
            damage_factor: 1.0,
            damage_until_tick: 0,
            speed_factor: 1.0,
            speed_until_tick: 0,
        }
    }
}

/// A pooled projectile. Inactive slots park far below the arena until fired.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Stable index of this slot within the pool.
    pub slot: u32,
    pub in_use: bool,
    /// Player id of the shooter while in flight.
    pub shooter: Option<u32>,
    /// Generation counter, bumped on every activation. Lets a stale
    /// scheduled time-to-live expiry recognize that the slot was reused.
    pub generation: u32,
}

/// A power-up pickup placed in the arena.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUpPickup {
    /// Stable index of this pickup within the arena layout.
    pub index: u32,
    pub kind: PowerUpKind,
    /// Trigger radius (meters).
    pub radius: f64,
    /// Consumed pickups deactivate until their scheduled reappearance.
    pub active: bool,
}

/// An armed proximity mine planted by a Mine power-up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mine {
    /// Player id of the tank that planted it.
    pub owner: u32,
    /// Detonation trigger radius (meters).
    pub trigger_radius: f64,
    /// Tick at which the mine was planted (stable ordering key).
    pub planted_tick: u64,
}

/// A static sight-blocking obstacle (rock, wreck, building footprint).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub radius: f64,
}

/// A team spawn point with an availability window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Stable index within the arena layout.
    pub index: u32,
    pub team: Team,
    /// Recently used points are unavailable until released.
    pub available: bool,
}
