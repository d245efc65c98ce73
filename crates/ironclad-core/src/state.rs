//! Match snapshot — the complete visible state produced after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete match state built by the snapshot system after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub tanks: Vec<TankView>,
    pub projectiles: Vec<ProjectileView>,
    pub power_ups: Vec<PowerUpView>,
    pub mines: Vec<MineView>,
    pub score: ScoreView,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<GameEvent>,
}

/// One tank as seen by a presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TankView {
    pub player_id: u32,
    pub name: String,
    pub team: Team,
    pub position: Position,
    /// Hull heading (radians, 0 = North).
    pub heading: f64,
    /// Speed over ground (m/s).
    pub speed: f64,
    /// Turret yaw (radians, 0 = North).
    pub turret_yaw: f64,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    /// Player id of the confirmed lock target, if any.
    pub locked_target: Option<u32>,
    /// Player id of the candidate currently charging or decaying, if any.
    pub pending_target: Option<u32>,
    pub is_locked_on: bool,
    pub shield_active: bool,
    pub kills: u32,
    pub deaths: u32,
}

/// One in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub slot: u32,
    pub shooter: u32,
    pub position: Position,
    pub heading: f64,
}

/// One power-up pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub index: u32,
    pub kind: PowerUpKind,
    pub position: Position,
    pub active: bool,
}

/// One armed mine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineView {
    pub owner: u32,
    pub position: Position,
}

/// Running team score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub team1_kills: u32,
    pub team2_kills: u32,
    pub kill_limit: u32,
}
