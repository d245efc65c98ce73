//! Damage application — blast falloff, team gating, and the die-once path.
//!
//! All damage funnels through here: projectile blasts, mine detonations,
//! and self-destructs. Friendly fire is rejected at the team gate, an
//! active shield absorbs the hit outright, and a tank dies exactly once —
//! death zeroes its velocity, silently resets its lock tracker, credits
//! the killer, and schedules the respawn.

use hecs::World;

use ironclad_core::components::{ActiveEffects, Health, PlayerInfo, Tank};
use ironclad_core::constants::RESPAWN_DELAY_SECS;
use ironclad_core::enums::{DeathCause, Team};
use ironclad_core::events::GameEvent;
use ironclad_core::types::{Position, Velocity};

use ironclad_targeting::TargetLockTracker;

use crate::engine::ScoreState;
use crate::scheduler::{EventScheduler, ScheduledAction};

/// Apply radial blast damage around `center` on behalf of `source_id`.
///
/// Damage falls off linearly from `base_damage` at the center to zero at
/// `radius`, scaled by the attacker's damage boost. Only tanks opposing
/// `source_team` are affected.
#[allow(clippy::too_many_arguments)]
pub fn apply_blast(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    center: &Position,
    source_id: u32,
    source_team: Team,
    base_damage: i32,
    radius: f64,
    cause: DeathCause,
    current_tick: u64,
) {
    let boost = attacker_damage_factor(world, source_id);

    // Collect victims first; hecs queries cannot overlap the mutations below.
    let mut victims: Vec<(hecs::Entity, u32, f64)> = world
        .query::<(&Tank, &PlayerInfo, &Health, &Position)>()
        .iter()
        .filter(|(_, (_, info, health, pos))| {
            health.current > 0
                && info.team != source_team
                && info.team != Team::Unassigned
                && center.range_to(pos) <= radius
        })
        .map(|(entity, (_, info, _, pos))| (entity, info.player_id, center.range_to(pos)))
        .collect();
    victims.sort_by_key(|v| v.1);

    for (entity, victim_id, distance) in victims {
        let falloff = 1.0 - (distance / radius).clamp(0.0, 1.0);
        let damage = (f64::from(base_damage) * falloff * boost).round() as i32;
        if damage <= 0 {
            continue;
        }
        apply_damage(
            world,
            scheduler,
            events,
            score,
            entity,
            victim_id,
            damage,
            cause,
            Some(source_id),
            source_team,
            current_tick,
        );
    }
}

/// Apply a damage amount to one tank, handling shield absorption, the
/// death transition, kill credit, and respawn scheduling.
#[allow(clippy::too_many_arguments)]
pub fn apply_damage(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    victim: hecs::Entity,
    victim_id: u32,
    damage: i32,
    cause: DeathCause,
    by: Option<u32>,
    by_team: Team,
    current_tick: u64,
) {
    if let Ok(effects) = world.get::<&ActiveEffects>(victim) {
        if effects.shield {
            return; // absorbed
        }
    }

    let died = {
        let mut health = match world.get::<&mut Health>(victim) {
            Ok(health) => health,
            Err(_) => return,
        };
        if health.current <= 0 {
            return; // already destroyed, no double kill
        }
        let old = health.current;
        health.current = (health.current - damage).max(0);
        events.push(GameEvent::DamageTaken {
            player_id: victim_id,
            amount: old - health.current,
            health_remaining: health.current,
        });
        health.current == 0
    };

    if died {
        destroy_tank(world, scheduler, events, victim, victim_id, cause, by, current_tick);
        if let Some(killer) = by {
            credit_kill(world, score, killer, by_team);
        }
    }
}

/// Detonate a tank that ordered self-destruct. Bypasses the shield — the
/// charge is inside the hull.
pub fn self_destruct(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    player_id: u32,
    current_tick: u64,
) {
    let Some(entity) = find_tank(world, player_id) else {
        return;
    };

    let destroyed = {
        let mut health = match world.get::<&mut Health>(entity) {
            Ok(health) => health,
            Err(_) => return,
        };
        if health.current <= 0 {
            return;
        }
        health.current = 0;
        true
    };

    if destroyed {
        destroy_tank(
            world,
            scheduler,
            events,
            entity,
            player_id,
            DeathCause::SelfDestruct,
            None,
            current_tick,
        );
    }
}

/// The one place a tank dies: bookkeeping, event, respawn scheduling.
#[allow(clippy::too_many_arguments)]
fn destroy_tank(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    entity: hecs::Entity,
    player_id: u32,
    cause: DeathCause,
    by: Option<u32>,
    current_tick: u64,
) {
    if let Ok(mut info) = world.get::<&mut PlayerInfo>(entity) {
        info.deaths += 1;
    }
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        *vel = Velocity::default();
    }
    // A destroyed tank forgets its lock without a Lost edge; observers
    // tracking *it* lose their locks through normal decay instead.
    if let Ok(mut tracker) = world.get::<&mut TargetLockTracker>(entity) {
        tracker.reset();
    }
    if let Ok(mut effects) = world.get::<&mut ActiveEffects>(entity) {
        *effects = ActiveEffects::default();
    }

    events.push(GameEvent::TankDestroyed {
        player_id,
        cause,
        by,
    });
    scheduler.schedule_in(
        player_id,
        current_tick,
        RESPAWN_DELAY_SECS,
        ScheduledAction::RespawnTank,
    );
}

/// Bump the killer's personal and team tallies.
fn credit_kill(world: &mut World, score: &mut ScoreState, killer_id: u32, killer_team: Team) {
    for (_entity, info) in world.query_mut::<&mut PlayerInfo>() {
        if info.player_id == killer_id {
            info.kills += 1;
            break;
        }
    }
    match killer_team {
        Team::Team1 => score.team1_kills += 1,
        Team::Team2 => score.team2_kills += 1,
        Team::Unassigned => {}
    }
}

/// The attacker's current outgoing-damage multiplier (1.0 when the
/// attacker cannot be found).
fn attacker_damage_factor(world: &World, player_id: u32) -> f64 {
    world
        .query::<(&PlayerInfo, &ActiveEffects)>()
        .iter()
        .find(|(_, (info, _))| info.player_id == player_id)
        .map(|(_, (_, effects))| effects.damage_factor)
        .unwrap_or(1.0)
}

/// Find a tank entity by player id.
pub fn find_tank(world: &World, player_id: u32) -> Option<hecs::Entity> {
    world
        .query::<(&Tank, &PlayerInfo)>()
        .iter()
        .find(|(_, (_, info))| info.player_id == player_id)
        .map(|(entity, _)| entity)
}
