//! Projectile pool and flight.
//!
//! A fixed pool of projectile entities is created at setup and recycled for
//! the whole match: firing claims the first free slot, a hit or an elapsed
//! time-to-live parks it again far below the arena. Flight is flat and
//! unpowered; the hit test sweeps the segment covered since the previous
//! tick against tank hulls and obstacle footprints.

use glam::DVec2;
use hecs::World;

use ironclad_core::components::{Health, Obstacle, PlayerInfo, Projectile, Tank, Turret};
use ironclad_core::constants::{
    ARENA_RADIUS, BLAST_DAMAGE, BLAST_RADIUS, DT, MUZZLE_OFFSET, PROJECTILE_SPEED,
    PROJECTILE_TTL_SECS, TANK_BODY_RADIUS,
};
use ironclad_core::enums::{DeathCause, Team};
use ironclad_core::events::GameEvent;
use ironclad_core::types::{Position, Velocity};

use crate::engine::ScoreState;
use crate::scheduler::{EventScheduler, ScheduledAction};

use super::damage;

/// Height at which inactive pool slots are parked, well out of play.
pub(crate) const PARK_Z: f64 = -1000.0;

/// Fire a projectile from a player's turret, claiming a pool slot.
pub fn fire(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    shooter_id: u32,
    current_tick: u64,
) {
    // Locate the shooter; a destroyed tank cannot fire.
    let shot = world
        .query::<(&Tank, &PlayerInfo, &Health, &Position, &Turret)>()
        .iter()
        .find(|(_, (_, info, ..))| info.player_id == shooter_id)
        .and_then(|(_, (_, _, health, pos, turret))| {
            (health.current > 0).then(|| (pos.offset_by(turret.yaw, MUZZLE_OFFSET), turret.yaw))
        });
    let Some((muzzle, yaw)) = shot else {
        return;
    };

    // First available slot, in slot order.
    let slot_entity = {
        let mut free: Vec<(u32, hecs::Entity)> = world
            .query::<&Projectile>()
            .iter()
            .filter(|(_, projectile)| !projectile.in_use)
            .map(|(entity, projectile)| (projectile.slot, entity))
            .collect();
        free.sort_by_key(|(slot, _)| *slot);
        free.first().map(|&(_, entity)| entity)
    };
    let Some(entity) = slot_entity else {
        log::warn!("projectile pool exhausted, dropping shot from player {shooter_id}");
        return;
    };

    if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
        projectile.in_use = true;
        projectile.shooter = Some(shooter_id);
        projectile.generation = projectile.generation.wrapping_add(1);
        scheduler.schedule_in(
            projectile.slot,
            current_tick,
            PROJECTILE_TTL_SECS,
            ScheduledAction::DeactivateProjectile {
                generation: projectile.generation,
            },
        );
    }

    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = muzzle;
    }
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        *vel = Velocity::from_heading(yaw, PROJECTILE_SPEED);
    }

    events.push(GameEvent::ProjectileFired {
        player_id: shooter_id,
    });
}

/// Earliest parameter t in [0, 1] at which the segment a->b enters the
/// circle (c, r), if it does. A segment starting inside hits at t = 0.
fn segment_circle_hit(a: DVec2, b: DVec2, c: DVec2, r: f64) -> Option<f64> {
    let d = b - a;
    let f = a - c;

    let cc = f.length_squared() - r * r;
    if cc <= 0.0 {
        return Some(0.0);
    }

    let aa = d.length_squared();
    if aa == 0.0 {
        return None;
    }
    let bb = 2.0 * f.dot(d);
    let disc = bb * bb - 4.0 * aa * cc;
    if disc < 0.0 {
        return None;
    }

    let t = (-bb - disc.sqrt()) / (2.0 * aa);
    (0.0..=1.0).contains(&t).then_some(t)
}

/// Advance hit detection for all in-flight projectiles.
/// Runs after movement: the swept segment is reconstructed from the
/// current position and one tick's worth of velocity.
pub fn run(
    world: &mut World,
    scheduler: &mut EventScheduler,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    current_tick: u64,
) {
    struct Impact {
        entity: hecs::Entity,
        shooter: u32,
        position: Position,
        exploded: bool,
    }

    let mut impacts: Vec<Impact> = Vec::new();

    {
        // Hull and obstacle footprints, collected once.
        let mut hulls: Vec<(u32, DVec2)> = world
            .query::<(&Tank, &PlayerInfo, &Health, &Position)>()
            .iter()
            .filter(|(_, (_, _, health, _))| health.current > 0)
            .map(|(_, (_, info, _, pos))| (info.player_id, DVec2::new(pos.x, pos.y)))
            .collect();
        hulls.sort_by_key(|(id, _)| *id);

        let footprints: Vec<(DVec2, f64)> = world
            .query::<(&Obstacle, &Position)>()
            .iter()
            .map(|(_, (obstacle, pos))| (DVec2::new(pos.x, pos.y), obstacle.radius))
            .collect();

        let mut flights: Vec<(hecs::Entity, u32, u32, Position, Velocity)> = world
            .query::<(&Projectile, &Position, &Velocity)>()
            .iter()
            .filter(|(_, (projectile, ..))| projectile.in_use)
            .filter_map(|(entity, (projectile, pos, vel))| {
                projectile
                    .shooter
                    .map(|shooter| (entity, projectile.slot, shooter, *pos, *vel))
            })
            .collect();
        flights.sort_by_key(|&(_, slot, ..)| slot);

        for (entity, _slot, shooter, pos, vel) in flights {
            let end = DVec2::new(pos.x, pos.y);
            let start = DVec2::new(pos.x - vel.x * DT, pos.y - vel.y * DT);

            // Earliest intersection along the swept segment wins.
            let mut best_t: Option<f64> = None;
            for &(hull_id, hull) in &hulls {
                if hull_id == shooter {
                    continue; // never collide with the tank that fired it
                }
                if let Some(t) = segment_circle_hit(start, end, hull, TANK_BODY_RADIUS) {
                    best_t = Some(best_t.map_or(t, |b: f64| b.min(t)));
                }
            }
            for &(center, radius) in &footprints {
                if let Some(t) = segment_circle_hit(start, end, center, radius) {
                    best_t = Some(best_t.map_or(t, |b: f64| b.min(t)));
                }
            }

            if let Some(t) = best_t {
                let point = start + (end - start) * t;
                impacts.push(Impact {
                    entity,
                    shooter,
                    position: Position::new(point.x, point.y, pos.z),
                    exploded: true,
                });
            } else if end.length() > ARENA_RADIUS {
                // Out of the arena: quietly park, no blast.
                impacts.push(Impact {
                    entity,
                    shooter,
                    position: pos,
                    exploded: false,
                });
            }
        }
    }

    for impact in impacts {
        park(world, impact.entity);
        if impact.exploded {
            let team = player_team(world, impact.shooter);
            damage::apply_blast(
                world,
                scheduler,
                events,
                score,
                &impact.position,
                impact.shooter,
                team,
                BLAST_DAMAGE,
                BLAST_RADIUS,
                DeathCause::Projectile,
                current_tick,
            );
        }
    }
}

/// Scheduled time-to-live expiry for a slot. The generation check makes a
/// stale expiry for a recycled slot a no-op.
pub fn deactivate_slot(world: &mut World, slot: u32, generation: u32) {
    let entity = world
        .query::<&Projectile>()
        .iter()
        .find(|(_, projectile)| projectile.slot == slot)
        .map(|(entity, _)| entity);

    if let Some(entity) = entity {
        let live = world
            .get::<&Projectile>(entity)
            .map(|projectile| projectile.in_use && projectile.generation == generation)
            .unwrap_or(false);
        if live {
            park(world, entity);
        }
    }
}

/// Return a projectile to the pool, parked out of play.
fn park(world: &mut World, entity: hecs::Entity) {
    if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
        projectile.in_use = false;
        projectile.shooter = None;
    }
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = Position::new(0.0, 0.0, PARK_Z);
    }
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        *vel = Velocity::default();
    }
}

/// Team of a player id (Unassigned when unknown).
fn player_team(world: &World, player_id: u32) -> Team {
    world
        .query::<&PlayerInfo>()
        .iter()
        .find(|(_, info)| info.player_id == player_id)
        .map(|(_, info)| info.team)
        .unwrap_or_default()
}
