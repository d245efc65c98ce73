//! Snapshot system: queries the ECS world and builds a complete MatchSnapshot.
//!
//! This system is read-only — it never modifies the world. All output
//! lists are sorted on stable keys so identical worlds serialize
//! identically.

use hecs::World;

use ironclad_core::components::*;
use ironclad_core::constants::KILL_LIMIT;
use ironclad_core::enums::GamePhase;
use ironclad_core::events::GameEvent;
use ironclad_core::state::*;
use ironclad_core::types::{Position, SimTime, Velocity};

use ironclad_targeting::TargetLockTracker;

use crate::engine::ScoreState;

/// Build a complete MatchSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    events: Vec<GameEvent>,
    score: &ScoreState,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        phase,
        tanks: build_tanks(world),
        projectiles: build_projectiles(world),
        power_ups: build_power_ups(world),
        mines: build_mines(world),
        score: ScoreView {
            team1_kills: score.team1_kills,
            team2_kills: score.team2_kills,
            kill_limit: KILL_LIMIT,
        },
        events,
    }
}

fn build_tanks(world: &World) -> Vec<TankView> {
    let mut tanks: Vec<TankView> = world
        .query::<(
            &Tank,
            &PlayerInfo,
            &Health,
            &Position,
            &Velocity,
            &Turret,
            &ActiveEffects,
            &TargetLockTracker,
        )>()
        .iter()
        .map(
            |(_, (_, info, health, pos, vel, turret, effects, tracker))| TankView {
                player_id: info.player_id,
                name: info.name.clone(),
                team: info.team,
                position: *pos,
                heading: vel.heading(),
                speed: vel.speed(),
                turret_yaw: turret.yaw,
                health: health.current,
                max_health: health.max,
                alive: health.current > 0,
                locked_target: tracker.locked_target().map(|id| id.0 as u32),
                pending_target: tracker.pending_target().map(|id| id.0 as u32),
                is_locked_on: tracker.is_locked_on(),
                shield_active: effects.shield,
                kills: info.kills,
                deaths: info.deaths,
            },
        )
        .collect();

    tanks.sort_by_key(|t| t.player_id);
    tanks
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (projectile, ..))| projectile.in_use)
        .map(|(_, (projectile, pos, vel))| ProjectileView {
            slot: projectile.slot,
            shooter: projectile.shooter.unwrap_or(0),
            position: *pos,
            heading: vel.heading(),
        })
        .collect();

    projectiles.sort_by_key(|p| p.slot);
    projectiles
}

fn build_power_ups(world: &World) -> Vec<PowerUpView> {
    let mut power_ups: Vec<PowerUpView> = world
        .query::<(&PowerUpPickup, &Position)>()
        .iter()
        .map(|(_, (pickup, pos))| PowerUpView {
            index: pickup.index,
            kind: pickup.kind,
            position: *pos,
            active: pickup.active,
        })
        .collect();

    power_ups.sort_by_key(|p| p.index);
    power_ups
}

fn build_mines(world: &World) -> Vec<MineView> {
    let mut mines: Vec<(u64, MineView)> = world
        .query::<(&Mine, &Position)>()
        .iter()
        .map(|(_, (mine, pos))| {
            (
                mine.planted_tick,
                MineView {
                    owner: mine.owner,
                    position: *pos,
                },
            )
        })
        .collect();

    mines.sort_by_key(|(planted_tick, view)| (*planted_tick, view.owner));
    mines.into_iter().map(|(_, view)| view).collect()
}
