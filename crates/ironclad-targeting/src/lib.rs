//! Target-lock tracking for IRONCLAD tanks.
//!
//! Implements the acquire/lose hysteresis state machine that decides, tick
//! by tick, which visible candidate a tank is locked onto. Pure functions
//! and plain data — no ECS dependency. The caller supplies the per-tick
//! candidate list (whatever passed its visibility test) and candidate
//! positions; the tracker returns the confirmed lock plus edge-triggered
//! transition events.

pub mod selector;
pub mod tracker;

pub use ironclad_core as core;
pub use tracker::{Contact, LockConfig, LockTransition, LockUpdate, TargetId, TargetLockTracker};

#[cfg(test)]
mod tests;
