//! Spawn-point bookkeeping and the respawn flow.
//!
//! Each team owns a set of spawn points. Using one makes it unavailable
//! for a cooldown window (released by a scheduled event); selection takes
//! the first available point in layout order and falls back to a random
//! team point when every one is on cooldown. Destroyed tanks come back
//! through here after the respawn delay.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ironclad_core::components::{ActiveEffects, Health, PlayerInfo, SpawnPoint, Tank};
use ironclad_core::constants::SPAWN_POINT_COOLDOWN_SECS;
use ironclad_core::enums::Team;
use ironclad_core::events::GameEvent;
use ironclad_core::types::{Position, Velocity};

use crate::scheduler::{EventScheduler, ScheduledAction};

use super::damage;

/// Pick the team with fewer players for a new arrival. Ties go to Team1.
pub fn assign_team(world: &World) -> Team {
    let mut team1 = 0usize;
    let mut team2 = 0usize;
    for (_entity, info) in world.query::<&PlayerInfo>().iter() {
        match info.team {
            Team::Team1 => team1 += 1,
            Team::Team2 => team2 += 1,
            Team::Unassigned => {}
        }
    }
    if team1 <= team2 {
        Team::Team1
    } else {
        Team::Team2
    }
}

/// Claim a spawn position for `team`.
///
/// Prefers the first available team point in layout order; when all of
/// them are on cooldown, falls back to a random team point anyway. The
/// claimed point goes on cooldown either way.
pub fn take_spawn_point(
    world: &mut World,
    scheduler: &mut EventScheduler,
    rng: &mut ChaCha8Rng,
    team: Team,
    current_tick: u64,
) -> Position {
    let mut points: Vec<(hecs::Entity, u32, bool, Position)> = world
        .query::<(&SpawnPoint, &Position)>()
        .iter()
        .filter(|(_, (point, _))| point.team == team)
        .map(|(entity, (point, pos))| (entity, point.index, point.available, *pos))
        .collect();
    points.sort_by_key(|p| p.1);

    if points.is_empty() {
        return Position::default();
    }

    let chosen = match points.iter().find(|(_, _, available, _)| *available) {
        Some(point) => *point,
        None => {
            log::warn!("no spawn point available for {team:?}, picking a random one");
            points[rng.gen_range(0..points.len())]
        }
    };
    let (entity, index, _, position) = chosen;

    if let Ok(mut point) = world.get::<&mut SpawnPoint>(entity) {
        point.available = false;
    }
    scheduler.schedule_in(
        index,
        current_tick,
        SPAWN_POINT_COOLDOWN_SECS,
        ScheduledAction::ReleaseSpawnPoint,
    );

    position
}

/// Scheduled release of a cooled-down spawn point.
pub fn release_spawn_point(world: &mut World, index: u32) {
    for (_entity, point) in world.query_mut::<&mut SpawnPoint>() {
        if point.index == index {
            point.available = true;
        }
    }
}

/// Scheduled respawn of a destroyed tank: full health, clean effects,
/// teleported to a fresh team spawn point.
pub fn respawn_tank(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    rng: &mut ChaCha8Rng,
    player_id: u32,
    current_tick: u64,
) {
    let Some(entity) = damage::find_tank(world, player_id) else {
        return;
    };

    let team = {
        let Ok(mut query) = world.query_one::<(&Tank, &PlayerInfo, &Health)>(entity) else {
            return;
        };
        match query.get() {
            // Still alive (nothing to do) or gone: bail out.
            Some((_, _, health)) if health.current > 0 => return,
            Some((_, info, _)) => info.team,
            None => return,
        }
    };

    let spawn_position = take_spawn_point(world, scheduler, rng, team, current_tick);

    if let Ok(mut health) = world.get::<&mut Health>(entity) {
        health.current = health.max;
    }
    if let Ok(mut effects) = world.get::<&mut ActiveEffects>(entity) {
        *effects = ActiveEffects::default();
    }
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = spawn_position;
    }
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        *vel = Velocity::default();
    }

    events.push(GameEvent::TankRespawned { player_id });
}
