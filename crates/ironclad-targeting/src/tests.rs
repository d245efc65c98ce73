#[cfg(test)]
mod tests {
    use ironclad_core::types::Position;

    use crate::tracker::{Contact, LockConfig, LockTransition, TargetId, TargetLockTracker};

    const A: TargetId = TargetId(1);
    const B: TargetId = TargetId(2);

    fn own() -> Position {
        Position::new(0.0, 0.0, 0.0)
    }

    fn contact(id: TargetId, range: f64) -> Contact {
        Contact {
            id,
            position: Position::new(0.0, range, 0.0),
        }
    }

    /// Default tracker: 0.5s acquire, 0.5s lose.
    fn tracker() -> TargetLockTracker {
        TargetLockTracker::default()
    }

    /// Run `n` ticks of 0.1s with the same contact list, collecting all
    /// transitions along the way.
    fn run_ticks(
        tracker: &mut TargetLockTracker,
        contacts: &[Contact],
        n: usize,
    ) -> Vec<LockTransition> {
        let mut all = Vec::new();
        for _ in 0..n {
            all.extend(tracker.evaluate(&own(), contacts, 0.1).transitions);
        }
        all
    }

    // ---- Acquisition ----

    #[test]
    fn test_single_candidate_locks_exactly_once() {
        let mut t = tracker();
        let contacts = vec![contact(A, 100.0)];

        // 6 ticks of 0.1s: pending charges to 0.5 over the first five,
        // the sixth confirms the lock.
        let transitions = run_ticks(&mut t, &contacts, 6);
        assert_eq!(transitions, vec![LockTransition::Locked(A)]);
        assert_eq!(t.locked_target(), Some(A));
        assert!(t.is_locked_on());

        // Continuing to observe only A never re-fires Locked.
        let transitions = run_ticks(&mut t, &contacts, 50);
        assert!(transitions.is_empty());
        assert_eq!(t.locked_target(), Some(A));
    }

    #[test]
    fn test_no_lock_before_acquire_threshold() {
        let mut t = tracker();
        let contacts = vec![contact(A, 100.0)];

        // 0.4s of visibility is not enough.
        let transitions = run_ticks(&mut t, &contacts, 4);
        assert!(transitions.is_empty());
        assert_eq!(t.locked_target(), None);
        assert!(!t.is_locked_on());
        assert!(t.is_gaining_lock());
        assert_eq!(t.pending_target(), Some(A));
    }

    #[test]
    fn test_closest_candidate_wins_acquisition() {
        let mut t = tracker();
        let contacts = vec![contact(A, 200.0), contact(B, 50.0)];

        let transitions = run_ticks(&mut t, &contacts, 6);
        assert_eq!(transitions, vec![LockTransition::Locked(B)]);
    }

    // ---- Loss ----

    #[test]
    fn test_lock_drops_after_lose_threshold() {
        let mut t = tracker();
        run_ticks(&mut t, &[contact(A, 100.0)], 6);
        assert_eq!(t.locked_target(), Some(A));

        // Empty list: lost_secs reaches 0.5 on the fifth empty tick and
        // the lock drops there, exactly once.
        let mut transitions = Vec::new();
        for tick in 0..6 {
            let update = t.evaluate(&own(), &[], 0.1);
            if tick < 4 {
                assert_eq!(
                    update.locked_target,
                    Some(A),
                    "lock must survive through tick {tick}"
                );
            }
            transitions.extend(update.transitions);
        }
        assert_eq!(transitions, vec![LockTransition::Lost(A)]);
        assert_eq!(t.locked_target(), None);
        assert!(!t.is_locked_on());
    }

    #[test]
    fn test_brief_occlusion_does_not_drop_lock() {
        let mut t = tracker();
        let contacts = vec![contact(A, 100.0)];
        run_ticks(&mut t, &contacts, 6);

        // 0.4s of lost sight, under the 0.5s threshold.
        let transitions = run_ticks(&mut t, &[], 4);
        assert!(transitions.is_empty());
        assert_eq!(t.locked_target(), Some(A));

        // Reappearance re-confirms immediately and resets the lose timer;
        // no new Locked edge because the target never changed.
        let transitions = run_ticks(&mut t, &contacts, 1);
        assert!(transitions.is_empty());
        assert_eq!(t.locked_target(), Some(A));

        // The full lose window is available again.
        let transitions = run_ticks(&mut t, &[], 4);
        assert!(transitions.is_empty());
        assert_eq!(t.locked_target(), Some(A));
    }

    #[test]
    fn test_unlocked_empty_input_is_inert() {
        let mut t = tracker();
        for _ in 0..100 {
            let update = t.evaluate(&own(), &[], 0.1);
            assert_eq!(update.locked_target, None);
            assert!(update.transitions.is_empty());
        }
        assert!(!t.is_locked_on());
        assert_eq!(t.pending_target(), None);
    }

    // ---- Sticky lock and target switching ----

    #[test]
    fn test_fully_charged_threshold_switches_lock_instantly() {
        // While pending sits at the acquire threshold, whatever is closest
        // confirms immediately — so a closer challenger steals a fresh lock
        // on the very next tick, announced once, with no Lost edge for the
        // old target.
        let mut t = tracker();
        run_ticks(&mut t, &[contact(A, 100.0)], 6);
        assert_eq!(t.locked_target(), Some(A));

        let both = vec![contact(A, 100.0), contact(B, 20.0)];
        let transitions = run_ticks(&mut t, &both, 1);
        assert_eq!(transitions, vec![LockTransition::Locked(B)]);
        assert_eq!(t.locked_target(), Some(B));

        // B stays closest: no repeat announcements.
        let transitions = run_ticks(&mut t, &both, 10);
        assert!(transitions.is_empty());
    }

    #[test]
    fn test_visible_locked_target_reconfirms_mid_decay() {
        // Occlusion decays the timers; the moment the locked target is
        // closest again it re-confirms through the fast path and both
        // timers refill, without a new Locked edge.
        let mut t = tracker();
        run_ticks(&mut t, &[contact(A, 100.0)], 6);

        run_ticks(&mut t, &[], 3);
        assert!(t.pending_secs() < 0.5);
        assert!(t.lost_secs() > 0.0);
        assert_eq!(t.locked_target(), Some(A));

        let transitions = run_ticks(&mut t, &[contact(A, 100.0)], 1);
        assert!(transitions.is_empty());
        assert_eq!(t.locked_target(), Some(A));
        assert_eq!(t.pending_secs(), 0.5);
        assert_eq!(t.lost_secs(), 0.0);
    }

    #[test]
    fn test_lock_hands_off_after_full_decay() {
        let mut t = tracker();
        run_ticks(&mut t, &[contact(A, 100.0)], 6);
        assert_eq!(t.locked_target(), Some(A));

        // Two empty ticks knock pending off the charged threshold so the
        // instant-switch fast path no longer applies.
        run_ticks(&mut t, &[], 2);

        // Now only B is visible. The stale lock on A decays (three more
        // ticks to pending == 0, lost == 0.5), the hand-off branch then
        // silently forgets A and starts charging B from zero, and B
        // confirms once its own acquire time has elapsed.
        let only_b = vec![contact(B, 50.0)];
        let mut transitions = Vec::new();
        let mut saw_a_while_decaying = false;
        for _ in 0..9 {
            let update = t.evaluate(&own(), &only_b, 0.1);
            saw_a_while_decaying |= update.locked_target == Some(A);
            transitions.extend(update.transitions);
        }
        assert!(saw_a_while_decaying, "old lock must persist through decay");
        // No Lost(A): the hand-off is silent; only the new lock is announced.
        assert_eq!(transitions, vec![LockTransition::Locked(B)]);
        assert_eq!(t.locked_target(), Some(B));
    }

    #[test]
    fn test_pending_timer_stays_clamped_while_switching_targets() {
        let mut t = tracker();
        // Two equidistant candidates, list order alternating every tick:
        // the tie-break flips the closest candidate back and forth.
        let ab = vec![contact(A, 60.0), contact(B, 60.0)];
        let ba = vec![contact(B, 60.0), contact(A, 60.0)];

        for tick in 0..40 {
            let contacts = if tick % 2 == 0 { &ab } else { &ba };
            t.evaluate(&own(), contacts, 0.1);
            assert!(t.pending_secs() >= 0.0);
            assert!(t.pending_secs() <= 0.5);
            assert!(t.lost_secs() >= 0.0);
            assert!(t.lost_secs() <= 0.5);
        }
        // The charge is shared across the switching, so a lock confirms on
        // whichever candidate the tie-break picked once the timer filled.
        assert!(t.is_locked_on());
        let locked = t.locked_target().unwrap();
        assert!(locked == A || locked == B);
    }

    // ---- Degenerate inputs ----

    #[test]
    fn test_zero_and_negative_dt_are_harmless() {
        let mut t = tracker();
        let contacts = vec![contact(A, 100.0)];

        for _ in 0..100 {
            let update = t.evaluate(&own(), &contacts, 0.0);
            assert!(update.transitions.is_empty());
        }
        assert_eq!(t.locked_target(), None, "no time elapsed, no lock");

        for _ in 0..100 {
            let update = t.evaluate(&own(), &contacts, -1.0);
            assert!(update.transitions.is_empty());
        }
        assert_eq!(t.locked_target(), None);

        // Normal time flow still works afterwards.
        let transitions = run_ticks(&mut t, &contacts, 6);
        assert_eq!(transitions, vec![LockTransition::Locked(A)]);
    }

    #[test]
    fn test_oversized_dt_clamps_to_thresholds() {
        let mut t = tracker();
        let contacts = vec![contact(A, 100.0)];

        // One huge tick charges pending to exactly the threshold...
        t.evaluate(&own(), &contacts, 10.0);
        assert_eq!(t.locked_target(), None);
        // ...and the next confirms.
        let update = t.evaluate(&own(), &contacts, 10.0);
        assert_eq!(update.transitions, vec![LockTransition::Locked(A)]);

        // Same on the way out: one huge empty tick saturates the lose timer.
        let update = t.evaluate(&own(), &[], 10.0);
        assert_eq!(update.transitions, vec![LockTransition::Lost(A)]);
        assert_eq!(t.locked_target(), None);
    }

    #[test]
    fn test_config_floors_zero_timings() {
        let config = LockConfig::new(0.0, 0.0);
        assert!(config.lock_acquire_secs > 0.0);
        assert!(config.lock_lose_secs > 0.0);

        // Even with floored timings a lock still needs two evaluations:
        // one to saturate the timer, one to confirm.
        let mut t = TargetLockTracker::new(config);
        let contacts = vec![contact(A, 100.0)];
        assert!(t.evaluate(&own(), &contacts, 1.0).transitions.is_empty());
        assert_eq!(
            t.evaluate(&own(), &contacts, 1.0).transitions,
            vec![LockTransition::Locked(A)]
        );
    }

    // ---- Enable gate and reset ----

    #[test]
    fn test_disabling_resets_silently() {
        let mut t = tracker();
        let contacts = vec![contact(A, 100.0)];
        run_ticks(&mut t, &contacts, 6);
        assert!(t.is_locked_on());

        t.set_enabled(false);
        let update = t.evaluate(&own(), &contacts, 0.1);
        // No Lost edge on disable — the lock is forgotten, not lost.
        assert!(update.transitions.is_empty());
        assert_eq!(update.locked_target, None);
        assert!(!t.is_locked_on());

        // Re-enabling starts from scratch: full acquire time again.
        t.set_enabled(true);
        let transitions = run_ticks(&mut t, &contacts, 6);
        assert_eq!(transitions, vec![LockTransition::Locked(A)]);
    }

    #[test]
    fn test_reset_clears_targets_and_timers() {
        let mut t = tracker();
        run_ticks(&mut t, &[contact(A, 100.0)], 6);

        t.reset();
        assert_eq!(t.locked_target(), None);
        assert_eq!(t.pending_target(), None);
        assert!(!t.is_locked_on());
    }

    // ---- Timer exclusivity ----

    #[test]
    fn test_gaining_zeroes_lost_timer_but_losing_keeps_pending() {
        let mut t = tracker();

        // Charge partway toward a lock, then lose sight.
        run_ticks(&mut t, &[contact(A, 100.0)], 3);
        assert!((t.pending_secs() - 0.3).abs() < 1e-9);

        run_ticks(&mut t, &[], 2);
        // Losing decrements pending rather than resetting it.
        assert!((t.pending_secs() - 0.1).abs() < 1e-9);
        assert!((t.lost_secs() - 0.2).abs() < 1e-9);

        // One tick of sight zeroes the lose timer outright.
        run_ticks(&mut t, &[contact(A, 100.0)], 1);
        assert_eq!(t.lost_secs(), 0.0);
        assert!((t.pending_secs() - 0.2).abs() < 1e-9);
        assert!(t.is_gaining_lock());
    }
}
