//! Events emitted by the simulation for presentation layers (HUD overlays,
//! audio cues, kill feeds).
//!
//! Events are returned as part of each tick's snapshot — an explicit list
//! per call, never a broadcast mechanism. Every entry is edge-triggered:
//! it fires once on the transition, not every tick while a state persists.

use serde::{Deserialize, Serialize};

use crate::enums::{DeathCause, PowerUpKind, Team};

/// One notable thing that happened during a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A player joined and was placed on a team.
    PlayerJoined { player_id: u32, team: Team },
    /// The match-start countdown finished.
    MatchStarted,
    /// A team reached the kill limit.
    MatchEnded { winning_team: Team },

    /// A tank confirmed a lock on a target.
    TargetLocked { player_id: u32, target_id: u32 },
    /// A tank's confirmed lock decayed away.
    TargetLost { player_id: u32, target_id: u32 },

    /// A projectile left the muzzle.
    ProjectileFired { player_id: u32 },
    /// A tank took hull damage.
    DamageTaken {
        player_id: u32,
        amount: i32,
        health_remaining: i32,
    },
    /// A tank was destroyed.
    TankDestroyed {
        player_id: u32,
        cause: DeathCause,
        /// The player credited with the kill, if any.
        by: Option<u32>,
    },
    /// A destroyed tank came back at a spawn point.
    TankRespawned { player_id: u32 },

    /// A tank drove over an active pickup.
    PowerUpActivated { player_id: u32, kind: PowerUpKind },
    /// A timed effect ran out.
    PowerUpExpired { player_id: u32, kind: PowerUpKind },
    /// An armed mine went off under an enemy tank.
    MineDetonated { owner: u32, victim: u32 },
}
