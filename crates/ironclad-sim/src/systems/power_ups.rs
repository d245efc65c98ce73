//! Power-up pickups, timed effects, and mines.
//!
//! A tank driving over an active pickup consumes it: Health heals on the
//! spot, Shield/Damage/Speed set a timed effect with a scheduled expiry,
//! Mine plants an armed charge at the pickup position. Consumed pickups
//! reappear after a delay. Armed mines detonate under the first opposing
//! tank that comes close enough.

use hecs::World;

use ironclad_core::components::{
    ActiveEffects, Health, Mine, PlayerInfo, PowerUpPickup, Tank,
};
use ironclad_core::constants::{
    DT, HEALTH_PICKUP_AMOUNT, MINE_BLAST_RADIUS, MINE_DAMAGE, MINE_TRIGGER_RADIUS,
    DAMAGE_BOOST_FACTOR, POWER_UP_EFFECT_SECS, POWER_UP_RESPAWN_SECS, SPEED_BOOST_FACTOR,
};
use ironclad_core::enums::{DeathCause, PowerUpKind, Team};
use ironclad_core::events::GameEvent;
use ironclad_core::types::Position;

use crate::engine::ScoreState;
use crate::scheduler::{EventScheduler, ScheduledAction};

use super::damage;

/// Run pickup overlap checks and mine triggers for one tick.
pub fn run(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    current_tick: u64,
) {
    collect_pickups(world, scheduler, events, current_tick);
    trigger_mines(world, scheduler, events, score, current_tick);
}

/// Living tanks sorted by player id: the deterministic claim order when
/// several tanks overlap the same trigger in one tick.
fn living_tanks(world: &World) -> Vec<(hecs::Entity, u32, Team, Position)> {
    let mut tanks: Vec<(hecs::Entity, u32, Team, Position)> = world
        .query::<(&Tank, &PlayerInfo, &Health, &Position)>()
        .iter()
        .filter(|(_, (_, _, health, _))| health.current > 0)
        .map(|(entity, (_, info, _, pos))| (entity, info.player_id, info.team, *pos))
        .collect();
    tanks.sort_by_key(|t| t.1);
    tanks
}

fn collect_pickups(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) {
    let tanks = living_tanks(world);

    struct Claim {
        pickup: hecs::Entity,
        index: u32,
        kind: PowerUpKind,
        position: Position,
        tank: hecs::Entity,
        player_id: u32,
    }

    let mut claims: Vec<Claim> = Vec::new();
    {
        let mut pickups: Vec<(hecs::Entity, u32, PowerUpKind, f64, Position)> = world
            .query::<(&PowerUpPickup, &Position)>()
            .iter()
            .filter(|(_, (pickup, _))| pickup.active)
            .map(|(entity, (pickup, pos))| {
                (entity, pickup.index, pickup.kind, pickup.radius, *pos)
            })
            .collect();
        pickups.sort_by_key(|p| p.1);

        for (pickup, index, kind, radius, position) in pickups {
            let claimed = tanks
                .iter()
                .find(|(_, _, _, tank_pos)| position.horizontal_range_to(tank_pos) <= radius);
            if let Some(&(tank, player_id, _, _)) = claimed {
                claims.push(Claim {
                    pickup,
                    index,
                    kind,
                    position,
                    tank,
                    player_id,
                });
            }
        }
    }

    for claim in claims {
        if let Ok(mut pickup) = world.get::<&mut PowerUpPickup>(claim.pickup) {
            pickup.active = false;
        }
        scheduler.schedule_in(
            claim.index,
            current_tick,
            POWER_UP_RESPAWN_SECS,
            ScheduledAction::RespawnPowerUp,
        );

        grant(world, scheduler, claim.tank, claim.player_id, claim.kind, &claim.position, current_tick);

        events.push(GameEvent::PowerUpActivated {
            player_id: claim.player_id,
            kind: claim.kind,
        });
    }
}

/// Apply one pickup's effect to the claiming tank.
fn grant(
    world: &mut World,
    scheduler: &mut EventScheduler,
    tank: hecs::Entity,
    player_id: u32,
    kind: PowerUpKind,
    pickup_position: &Position,
    current_tick: u64,
) {
    let effect_ticks = (POWER_UP_EFFECT_SECS / DT).ceil() as u64;
    let until_tick = current_tick + effect_ticks;

    match kind {
        PowerUpKind::Health => {
            if let Ok(mut health) = world.get::<&mut Health>(tank) {
                health.current = (health.current + HEALTH_PICKUP_AMOUNT).min(health.max);
            }
        }
        PowerUpKind::Shield => {
            if let Ok(mut effects) = world.get::<&mut ActiveEffects>(tank) {
                effects.shield = true;
                effects.shield_until_tick = until_tick;
            }
            scheduler.schedule_at(player_id, until_tick, ScheduledAction::ExpireEffect(kind));
        }
        PowerUpKind::Damage => {
            if let Ok(mut effects) = world.get::<&mut ActiveEffects>(tank) {
                effects.damage_factor = DAMAGE_BOOST_FACTOR;
                effects.damage_until_tick = until_tick;
            }
            scheduler.schedule_at(player_id, until_tick, ScheduledAction::ExpireEffect(kind));
        }
        PowerUpKind::Speed => {
            if let Ok(mut effects) = world.get::<&mut ActiveEffects>(tank) {
                effects.speed_factor = SPEED_BOOST_FACTOR;
                effects.speed_until_tick = until_tick;
            }
            scheduler.schedule_at(player_id, until_tick, ScheduledAction::ExpireEffect(kind));
        }
        PowerUpKind::Mine => {
            world.spawn((
                Mine {
                    owner: player_id,
                    trigger_radius: MINE_TRIGGER_RADIUS,
                    planted_tick: current_tick,
                },
                *pickup_position,
            ));
        }
    }
}

fn trigger_mines(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    current_tick: u64,
) {
    let tanks = living_tanks(world);

    struct Detonation {
        mine: hecs::Entity,
        owner: u32,
        owner_team: Team,
        victim_id: u32,
        position: Position,
    }

    let mut detonations: Vec<Detonation> = Vec::new();
    {
        let mut mines: Vec<(hecs::Entity, u32, f64, u64, Position)> = world
            .query::<(&Mine, &Position)>()
            .iter()
            .map(|(entity, (mine, pos))| {
                (entity, mine.owner, mine.trigger_radius, mine.planted_tick, *pos)
            })
            .collect();
        mines.sort_by_key(|m| (m.3, m.1));

        for (mine, owner, trigger_radius, _, position) in mines {
            let owner_team = tanks
                .iter()
                .find(|(_, id, _, _)| *id == owner)
                .map(|(_, _, team, _)| *team)
                .unwrap_or_else(|| player_team(world, owner));

            let victim = tanks.iter().find(|(_, _, team, tank_pos)| {
                *team != owner_team
                    && *team != Team::Unassigned
                    && position.horizontal_range_to(tank_pos) <= trigger_radius
            });

            if let Some(&(_, victim_id, _, _)) = victim {
                detonations.push(Detonation {
                    mine,
                    owner,
                    owner_team,
                    victim_id,
                    position,
                });
            }
        }
    }

    for detonation in detonations {
        events.push(GameEvent::MineDetonated {
            owner: detonation.owner,
            victim: detonation.victim_id,
        });
        let _ = world.despawn(detonation.mine);
        damage::apply_blast(
            world,
            scheduler,
            events,
            score,
            &detonation.position,
            detonation.owner,
            detonation.owner_team,
            MINE_DAMAGE,
            MINE_BLAST_RADIUS,
            DeathCause::Mine,
            current_tick,
        );
    }
}

/// Scheduled expiry for a timed effect. Re-granted effects carry a later
/// deadline in their component, which makes the earlier expiry a no-op.
pub fn expire_effect(
    world: &mut World,
    events: &mut Vec<GameEvent>,
    player_id: u32,
    kind: PowerUpKind,
    current_tick: u64,
) {
    let Some(entity) = damage::find_tank(world, player_id) else {
        return;
    };
    let Ok(mut effects) = world.get::<&mut ActiveEffects>(entity) else {
        return;
    };

    let expired = match kind {
        PowerUpKind::Shield => {
            if effects.shield && current_tick >= effects.shield_until_tick {
                effects.shield = false;
                true
            } else {
                false
            }
        }
        PowerUpKind::Damage => {
            if effects.damage_factor != 1.0 && current_tick >= effects.damage_until_tick {
                effects.damage_factor = 1.0;
                true
            } else {
                false
            }
        }
        PowerUpKind::Speed => {
            if effects.speed_factor != 1.0 && current_tick >= effects.speed_until_tick {
                effects.speed_factor = 1.0;
                true
            } else {
                false
            }
        }
        PowerUpKind::Health | PowerUpKind::Mine => false,
    };
    drop(effects);

    if expired {
        events.push(GameEvent::PowerUpExpired { player_id, kind });
    }
}

/// Scheduled reappearance of a consumed pickup.
pub fn reactivate_pickup(world: &mut World, index: u32) {
    for (_entity, pickup) in world.query_mut::<&mut PowerUpPickup>() {
        if pickup.index == index {
            pickup.active = true;
        }
    }
}

/// Team of a player id from PlayerInfo (covers dead owners, whose tanks
/// are filtered out of the living list).
fn player_team(world: &World, player_id: u32) -> Team {
    world
        .query::<&PlayerInfo>()
        .iter()
        .find(|(_, info)| info.player_id == player_id)
        .map(|(_, info)| info.team)
        .unwrap_or_default()
}
