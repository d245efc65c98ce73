//! Deferred-event queue.
//!
//! Every delayed action in the match (respawn delays, spawn-point
//! cooldowns, effect expiry, projectile time-to-live, self-destruct fuses,
//! the match-start countdown) runs through this explicit queue. Entries
//! are keyed by (owner, deadline tick) and carry a monotonic sequence
//! number so same-tick entries drain in the order they were scheduled.

use ironclad_core::constants::DT;
use ironclad_core::enums::PowerUpKind;

/// What to do when a scheduled deadline arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// End the match-start countdown.
    BeginMatch,
    /// Bring a destroyed tank back at a spawn point.
    RespawnTank,
    /// Make a used spawn point available again.
    ReleaseSpawnPoint,
    /// Clear a timed power-up effect, unless it was re-granted meanwhile.
    ExpireEffect(PowerUpKind),
    /// Park an in-flight projectile whose time-to-live elapsed.
    /// The generation guards against the slot having been reused.
    DeactivateProjectile { generation: u32 },
    /// Reactivate a consumed power-up pickup.
    RespawnPowerUp,
    /// Detonate a tank that ordered self-destruct.
    SelfDestruct,
}

/// One queued deadline.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    /// Tick at which the action becomes due.
    pub due_tick: u64,
    /// Scheduling order, for deterministic same-tick draining.
    pub seq: u64,
    /// The id the action applies to: a player id, spawn-point index,
    /// pickup index, or projectile slot, depending on the action.
    pub owner: u32,
    pub action: ScheduledAction,
}

/// The queue itself. Small enough that a plain vector beats a heap.
#[derive(Debug, Default)]
pub struct EventScheduler {
    entries: Vec<ScheduledEvent>,
    next_seq: u64,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action at an absolute tick.
    pub fn schedule_at(&mut self, owner: u32, due_tick: u64, action: ScheduledAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(ScheduledEvent {
            due_tick,
            seq,
            owner,
            action,
        });
    }

    /// Schedule an action `delay_secs` from `current_tick`, rounding the
    /// deadline up to a whole tick.
    pub fn schedule_in(
        &mut self,
        owner: u32,
        current_tick: u64,
        delay_secs: f64,
        action: ScheduledAction,
    ) {
        let delay_ticks = (delay_secs.max(0.0) / DT).ceil() as u64;
        self.schedule_at(owner, current_tick + delay_ticks, action);
    }

    /// Remove and return everything due at or before `current_tick`,
    /// ordered by (deadline, scheduling order).
    pub fn drain_due(&mut self, current_tick: u64) -> Vec<ScheduledEvent> {
        let mut due: Vec<ScheduledEvent> = Vec::new();
        self.entries.retain(|entry| {
            if entry.due_tick <= current_tick {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| (entry.due_tick, entry.seq));
        due
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_respects_deadlines() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule_at(1, 10, ScheduledAction::RespawnTank);
        scheduler.schedule_at(2, 5, ScheduledAction::SelfDestruct);

        assert!(scheduler.drain_due(4).is_empty());

        let due = scheduler.drain_due(5);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, 2);

        let due = scheduler.drain_due(100);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_same_tick_drains_in_scheduling_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule_at(7, 3, ScheduledAction::ReleaseSpawnPoint);
        scheduler.schedule_at(8, 3, ScheduledAction::RespawnPowerUp);
        scheduler.schedule_at(9, 2, ScheduledAction::RespawnTank);

        let due = scheduler.drain_due(3);
        let owners: Vec<u32> = due.iter().map(|e| e.owner).collect();
        assert_eq!(owners, vec![9, 7, 8]);
    }

    #[test]
    fn test_schedule_in_rounds_up() {
        let mut scheduler = EventScheduler::new();
        // 0.05s at 30Hz is 1.5 ticks; the deadline rounds up to 2.
        scheduler.schedule_in(1, 100, 0.05, ScheduledAction::BeginMatch);
        assert!(scheduler.drain_due(101).is_empty());
        assert_eq!(scheduler.drain_due(102).len(), 1);
    }
}
