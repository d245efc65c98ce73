//! Turret aiming system — slews each turret toward its desired yaw.

use hecs::World;

use ironclad_core::components::{Health, Turret};
use ironclad_core::constants::{DT, TURRET_TURN_RATE};

/// Slew every living tank's turret toward its desired yaw along the
/// shorter arc, at the fixed turn rate.
pub fn run(world: &mut World) {
    let max_step = TURRET_TURN_RATE * DT;

    for (_entity, (turret, health)) in world.query_mut::<(&mut Turret, &Health)>() {
        if health.current <= 0 {
            continue;
        }

        // Signed shortest-arc difference in [-PI, PI).
        let diff = (turret.desired_yaw - turret.yaw + std::f64::consts::PI)
            .rem_euclid(std::f64::consts::TAU)
            - std::f64::consts::PI;

        if diff.abs() <= max_step {
            turret.yaw = turret.desired_yaw;
        } else {
            turret.yaw += max_step * diff.signum();
        }
        turret.yaw = turret.yaw.rem_euclid(std::f64::consts::TAU);
    }
}
