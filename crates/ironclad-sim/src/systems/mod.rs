//! ECS systems that operate on the match world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for
//! read-only). They do not own state — all state lives in components.

pub mod aiming;
pub mod damage;
pub mod movement;
pub mod perception;
pub mod power_ups;
pub mod projectile;
pub mod respawn;
pub mod snapshot;
pub mod targeting;
