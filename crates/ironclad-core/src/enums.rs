//! Enumeration types used throughout the match simulation.

use serde::{Deserialize, Serialize};

/// Team affiliation for tanks and spawn points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Not yet placed on a team (lobby state).
    #[default]
    Unassigned,
    Team1,
    Team2,
}

impl Team {
    /// The opposing team, if this is a real team.
    pub fn opponent(&self) -> Option<Team> {
        match self {
            Team::Team1 => Some(Team::Team2),
            Team::Team2 => Some(Team::Team1),
            Team::Unassigned => None,
        }
    }
}

/// Match phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for players to join.
    #[default]
    Lobby,
    /// Match start requested, countdown running.
    Starting,
    /// Match in progress.
    Active,
    Paused,
    /// A team reached the kill limit.
    Complete,
}

/// Power-up pickup category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Instant heal.
    Health,
    /// Timed damage immunity.
    Shield,
    /// Timed outgoing-damage multiplier.
    Damage,
    /// Timed top-speed multiplier.
    Speed,
    /// Plants an armed proximity mine at the pickup position.
    Mine,
}

/// What destroyed a tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Projectile,
    Mine,
    SelfDestruct,
}
