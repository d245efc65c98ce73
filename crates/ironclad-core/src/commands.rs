//! Player commands sent from the outside world to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Lobby / match control ---
    /// Join the match; the engine assigns a player id and a team.
    JoinMatch { name: String },
    /// Begin the match-start countdown.
    StartMatch,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },

    // --- Tank control ---
    /// Order a tank to move at the given heading and speed.
    /// Speed is capped by the tank's limit and any active boost.
    Drive {
        player_id: u32,
        heading: f64,
        speed: f64,
    },
    /// Set the desired turret yaw; the turret slews toward it.
    AimTurret { player_id: u32, yaw: f64 },
    /// Fire a projectile from the turret.
    Fire { player_id: u32 },
    /// Enable or disable target locking for a tank.
    SetLockEnabled { player_id: u32, enabled: bool },
    /// Order a delayed self-destruct.
    SelfDestruct { player_id: u32 },
}
