//! Entity spawn factories for setting up the match world.
//!
//! Creates the arena furniture (obstacles, spawn points, power-up
//! pickups), pre-spawns the projectile pool, and builds tank bundles.

use hecs::World;

use ironclad_core::components::*;
use ironclad_core::constants::*;
use ironclad_core::enums::{PowerUpKind, Team};
use ironclad_core::types::{Position, Velocity};

use ironclad_targeting::TargetLockTracker;

use crate::systems::projectile::PARK_Z;

/// Set up the arena: obstacles, team spawn points, power-up pickups, and
/// the projectile pool. Tanks join later, one per player.
pub fn setup_arena(world: &mut World) {
    spawn_obstacles(world);
    spawn_spawn_points(world);
    spawn_power_ups(world);
    spawn_projectile_pool(world);
}

/// Four rocks around the middle of the arena, enough to break sight lines
/// without sealing off either half.
fn spawn_obstacles(world: &mut World) {
    let layout = [
        (120.0, 120.0, 10.0),
        (-120.0, 120.0, 10.0),
        (120.0, -120.0, 10.0),
        (-120.0, -120.0, 10.0),
    ];
    for (x, y, radius) in layout {
        world.spawn((Obstacle { radius }, Position::new(x, y, 0.0)));
    }
}

/// Four spawn points per team: Team1 along the south edge, Team2 along
/// the north edge.
fn spawn_spawn_points(world: &mut World) {
    let offsets = [-60.0, -20.0, 20.0, 60.0];

    for (i, x) in offsets.iter().enumerate() {
        world.spawn((
            SpawnPoint {
                index: i as u32,
                team: Team::Team1,
                available: true,
            },
            Position::new(*x, -320.0, 0.0),
        ));
    }
    for (i, x) in offsets.iter().enumerate() {
        world.spawn((
            SpawnPoint {
                index: (offsets.len() + i) as u32,
                team: Team::Team2,
                available: true,
            },
            Position::new(*x, 320.0, 0.0),
        ));
    }
}

/// One pickup of each kind around the arena center.
fn spawn_power_ups(world: &mut World) {
    let layout = [
        (PowerUpKind::Health, 0.0, 0.0),
        (PowerUpKind::Shield, 80.0, 0.0),
        (PowerUpKind::Damage, -80.0, 0.0),
        (PowerUpKind::Speed, 0.0, 80.0),
        (PowerUpKind::Mine, 0.0, -80.0),
    ];
    for (i, (kind, x, y)) in layout.into_iter().enumerate() {
        world.spawn((
            PowerUpPickup {
                index: i as u32,
                kind,
                radius: POWER_UP_RADIUS,
                active: true,
            },
            Position::new(x, y, 0.0),
        ));
    }
}

/// Pre-spawn the whole projectile pool, parked out of play.
fn spawn_projectile_pool(world: &mut World) {
    for slot in 0..PROJECTILE_POOL_SIZE {
        world.spawn((
            Projectile {
                slot: slot as u32,
                in_use: false,
                shooter: None,
                generation: 0,
            },
            Position::new(0.0, 0.0, PARK_Z),
            Velocity::default(),
        ));
    }
}

/// Spawn a tank for a player at the given position.
pub fn spawn_tank(
    world: &mut World,
    player_id: u32,
    name: &str,
    team: Team,
    position: Position,
) -> hecs::Entity {
    world.spawn((
        Tank,
        PlayerInfo {
            player_id,
            name: name.to_string(),
            team,
            kills: 0,
            deaths: 0,
        },
        Health {
            current: TANK_MAX_HEALTH,
            max: TANK_MAX_HEALTH,
        },
        Turret::default(),
        SightCone {
            half_angle: SIGHT_HALF_ANGLE,
            range: SIGHT_RANGE,
        },
        ActiveEffects::default(),
        TargetLockTracker::default(),
        position,
        Velocity::default(),
    ))
}
