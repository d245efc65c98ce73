//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.
//! Tanks are clamped inside the arena; projectiles run out past it and are
//! handled by the projectile system.

use hecs::World;

use ironclad_core::components::{Health, Tank};
use ironclad_core::constants::{ARENA_RADIUS, DT};
use ironclad_core::types::{Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
        pos.z += vel.z * DT;
    }

    // Keep tanks inside the arena: project back onto the boundary circle.
    for (_entity, (pos, vel, _tank, health)) in
        world.query_mut::<(&mut Position, &mut Velocity, &Tank, &Health)>()
    {
        if health.current <= 0 {
            continue;
        }
        let range = (pos.x * pos.x + pos.y * pos.y).sqrt();
        if range > ARENA_RADIUS {
            let scale = ARENA_RADIUS / range;
            pos.x *= scale;
            pos.y *= scale;
            *vel = Velocity::default();
        }
    }
}
