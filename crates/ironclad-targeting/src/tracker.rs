//! The target-lock acquisition/loss state machine.
//!
//! A tracker is created once per tank and fed every tick with the list of
//! candidates that passed the perception test. Two hysteresis timers keep
//! fleeting occlusions and distant flicker from causing lock chatter:
//! `pending_secs` charges toward the acquire threshold while a candidate
//! stays closest, `lost_secs` charges toward the lose threshold while the
//! locked target stays out of sight. Gaining always zeroes `lost_secs`;
//! losing only decrements `pending_secs`, never resets it.

use serde::{Deserialize, Serialize};

use ironclad_core::constants::{LOCK_ACQUIRE_SECS, LOCK_LOSE_SECS, LOCK_TIME_FLOOR_SECS};
use ironclad_core::types::Position;

use crate::selector::closest_contact;

/// Stable opaque handle for a lock candidate. The tracker only ever
/// compares these for identity; what they refer to is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

/// One candidate that passed the visibility test this tick, with its
/// caller-supplied position.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub id: TargetId,
    pub position: Position,
}

/// Hysteresis timings for a tracker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LockConfig {
    /// How long the same candidate must stay closest before the lock confirms.
    pub lock_acquire_secs: f64,
    /// How long sight can be lost before a confirmed lock drops.
    pub lock_lose_secs: f64,
}

impl LockConfig {
    /// Build a config, flooring both timings so a zero can never make
    /// locks instantaneous.
    pub fn new(lock_acquire_secs: f64, lock_lose_secs: f64) -> Self {
        Self {
            lock_acquire_secs: lock_acquire_secs.max(LOCK_TIME_FLOOR_SECS),
            lock_lose_secs: lock_lose_secs.max(LOCK_TIME_FLOOR_SECS),
        }
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self::new(LOCK_ACQUIRE_SECS, LOCK_LOSE_SECS)
    }
}

/// Edge-triggered lock transition. Emitted exactly once per actual
/// transition, never repeated while a state persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockTransition {
    /// A lock was confirmed on this candidate.
    Locked(TargetId),
    /// The confirmed lock on this candidate decayed away.
    Lost(TargetId),
}

/// Result of one tracker evaluation.
#[derive(Debug, Clone)]
pub struct LockUpdate {
    /// The currently confirmed lock, if any.
    pub locked_target: Option<TargetId>,
    /// Transitions that happened during this evaluation, in order.
    pub transitions: Vec<LockTransition>,
}

/// Per-tank lock state. Lives for the owning tank's lifetime and is
/// mutated only by [`TargetLockTracker::evaluate`], once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetLockTracker {
    config: LockConfig,
    locked_target: Option<TargetId>,
    pending_target: Option<TargetId>,
    /// Seconds charged toward acquiring a lock, in [0, lock_acquire_secs].
    pending_secs: f64,
    /// Seconds since losing sight of the lock, in [0, lock_lose_secs].
    lost_secs: f64,
    /// True while the last update charged the acquire timer.
    gaining_lock: bool,
    /// When disabled, every evaluation resets state and reports no lock.
    enabled: bool,
}

impl Default for TargetLockTracker {
    fn default() -> Self {
        Self::new(LockConfig::default())
    }
}

impl TargetLockTracker {
    pub fn new(config: LockConfig) -> Self {
        Self {
            config,
            locked_target: None,
            pending_target: None,
            pending_secs: 0.0,
            lost_secs: 0.0,
            gaining_lock: false,
            enabled: true,
        }
    }

    /// Evaluate one tick.
    ///
    /// `contacts` is whatever passed the caller's visibility test this tick
    /// (may be empty); `dt` is the elapsed seconds since the previous
    /// evaluation. Calling this more than once per tick with a nonzero `dt`
    /// double-counts timer progress — that contract is the caller's to keep.
    ///
    /// A negative `dt` is clamped to zero; an empty candidate list is simply
    /// "nothing currently visible". Nothing here can fail.
    pub fn evaluate(&mut self, own_position: &Position, contacts: &[Contact], dt: f64) -> LockUpdate {
        let mut transitions = Vec::new();

        if !self.enabled {
            self.reset();
            return LockUpdate {
                locked_target: None,
                transitions,
            };
        }

        let dt = dt.max(0.0);

        // Keep the old target around so we can detect transitions.
        let old_locked = self.locked_target;
        let closest = closest_contact(own_position, contacts).map(|c| c.id);

        if let Some(closest) = closest {
            // Is it time to lock, or are we looking at the locked target?
            if self.pending_secs == self.config.lock_acquire_secs
                || Some(closest) == self.locked_target
            {
                // Locked on. A still-visible locked target re-confirms here
                // even mid-decay, before the decay branches are consulted.
                self.locked_target = Some(closest);
                self.pending_target = Some(closest);
                self.pending_secs = self.config.lock_acquire_secs;
                self.lost_secs = 0.0;

                if old_locked != self.locked_target {
                    transitions.push(LockTransition::Locked(closest));
                }
            } else if self.pending_secs == 0.0
                && self.lost_secs == self.config.lock_lose_secs
                && self.pending_target != self.locked_target
            {
                // The previous lock fully decayed while attention was on a
                // different candidate: forget it silently and start
                // charging on the new one. No Lost transition fires for a
                // hand-off, only for a lock that empties out.
                self.locked_target = None;
                self.gaining_lock_update(dt);
                self.pending_target = Some(closest);
            } else if Some(closest) != self.locked_target && self.locked_target.is_some() {
                // Locked on something other than what's closest: decay.
                self.losing_lock_update(dt);
                self.pending_target = Some(closest);
            } else {
                // Charging acquisition on the closest candidate.
                self.gaining_lock_update(dt);
                self.pending_target = Some(closest);
            }
        } else {
            // Nothing visible: decay.
            self.losing_lock_update(dt);

            if self.lost_secs == self.config.lock_lose_secs {
                self.locked_target = None;
                self.pending_target = None;

                if let Some(previous) = old_locked {
                    transitions.push(LockTransition::Lost(previous));
                }
            }
        }

        LockUpdate {
            locked_target: self.locked_target,
            transitions,
        }
    }

    /// Charge the acquire timer; losing progress is wiped.
    fn gaining_lock_update(&mut self, dt: f64) {
        self.pending_secs = (self.pending_secs + dt).clamp(0.0, self.config.lock_acquire_secs);
        self.lost_secs = 0.0;
        self.gaining_lock = true;
    }

    /// Discharge the acquire timer and charge the lose timer.
    fn losing_lock_update(&mut self, dt: f64) {
        self.pending_secs = (self.pending_secs - dt).clamp(0.0, self.config.lock_acquire_secs);
        self.lost_secs = (self.lost_secs + dt).clamp(0.0, self.config.lock_lose_secs);
        self.gaining_lock = false;
    }

    /// Forget all lock state without emitting transitions.
    pub fn reset(&mut self) {
        self.locked_target = None;
        self.pending_target = None;
        self.pending_secs = 0.0;
        self.lost_secs = 0.0;
    }

    /// Enable or disable locking. A disabled tracker resets on its next
    /// evaluation; observers see only the next Locked edge after re-enabling.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn locked_target(&self) -> Option<TargetId> {
        self.locked_target
    }

    pub fn pending_target(&self) -> Option<TargetId> {
        self.pending_target
    }

    pub fn is_locked_on(&self) -> bool {
        self.locked_target.is_some()
    }

    pub fn is_gaining_lock(&self) -> bool {
        self.gaining_lock
    }

    /// Seconds charged toward acquiring a lock (for HUD lock progress).
    pub fn pending_secs(&self) -> f64 {
        self.pending_secs
    }

    /// Seconds since losing sight of the locked target.
    pub fn lost_secs(&self) -> f64 {
        self.lost_secs
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }
}
