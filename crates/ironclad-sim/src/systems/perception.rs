//! Perception system — the visibility test feeding the target-lock tracker.
//!
//! Each tick, every living tank gets the list of enemy tanks inside its
//! turret sight cone with an unobstructed line of sight. This is the only
//! producer of lock candidates; the tracker itself never looks at the world.

use glam::DVec2;
use hecs::World;

use ironclad_core::components::{Health, Obstacle, PlayerInfo, SightCone, Tank, Turret};
use ironclad_core::enums::Team;
use ironclad_core::types::Position;

use ironclad_targeting::{Contact, TargetId};

/// Candidate list for one observing tank.
pub struct TankContacts {
    pub entity: hecs::Entity,
    pub player_id: u32,
    pub contacts: Vec<Contact>,
}

/// Check if a bearing falls inside a cone centered on `facing` (radians).
fn in_cone(bearing: f64, facing: f64, half_angle: f64) -> bool {
    let diff = (bearing - facing).rem_euclid(std::f64::consts::TAU);
    diff <= half_angle || diff >= (std::f64::consts::TAU - half_angle)
}

/// Check whether the horizontal segment from `from` to `to` passes through
/// any obstacle footprint.
fn segment_blocked(from: &Position, to: &Position, obstacles: &[(Position, f64)]) -> bool {
    let a = DVec2::new(from.x, from.y);
    let b = DVec2::new(to.x, to.y);
    let ab = b - a;
    let len_sq = ab.length_squared();

    for (center, radius) in obstacles {
        let c = DVec2::new(center.x, center.y);
        // Closest point on the segment to the obstacle center.
        let t = if len_sq > 0.0 {
            ((c - a).dot(ab) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = a + ab * t;
        if closest.distance_squared(c) < radius * radius {
            return true;
        }
    }

    false
}

/// Build the per-tank candidate lists for this tick.
///
/// Dead tanks neither observe nor appear as candidates; teammates are never
/// candidates. Output and candidate order are sorted by player id so the
/// downstream tracker evaluation is deterministic.
pub fn run(world: &World) -> Vec<TankContacts> {
    // Snapshot all living tanks once.
    let mut tanks: Vec<(hecs::Entity, u32, Team, Position, f64, SightCone)> = world
        .query::<(&Tank, &PlayerInfo, &Health, &Position, &Turret, &SightCone)>()
        .iter()
        .filter(|(_, (_, _, health, ..))| health.current > 0)
        .map(|(entity, (_, info, _, pos, turret, sight))| {
            (entity, info.player_id, info.team, *pos, turret.yaw, *sight)
        })
        .collect();
    tanks.sort_by_key(|t| t.1);

    let obstacles: Vec<(Position, f64)> = world
        .query::<(&Obstacle, &Position)>()
        .iter()
        .map(|(_, (obstacle, pos))| (*pos, obstacle.radius))
        .collect();

    let mut results = Vec::with_capacity(tanks.len());

    for &(entity, player_id, team, pos, turret_yaw, sight) in &tanks {
        let mut contacts = Vec::new();

        for &(_, other_id, other_team, other_pos, _, _) in &tanks {
            if other_id == player_id {
                continue;
            }
            // Only opposing tanks are lock candidates.
            if other_team == team || other_team == Team::Unassigned {
                continue;
            }
            if pos.horizontal_range_to(&other_pos) > sight.range {
                continue;
            }
            if !in_cone(pos.bearing_to(&other_pos), turret_yaw, sight.half_angle) {
                continue;
            }
            if segment_blocked(&pos, &other_pos, &obstacles) {
                continue;
            }

            contacts.push(Contact {
                id: TargetId(u64::from(other_id)),
                position: other_pos,
            });
        }

        results.push(TankContacts {
            entity,
            player_id,
            contacts,
        });
    }

    results
}
