//! Property tests for the policy decision rules

use proptest::prelude::*;

use kindred::shared::policy;

proptest! {
    #[test]
    fn visibility_score_stays_in_unit_interval(
        ghosted in 0i64..10_000,
        graceful in 0i64..10_000,
    ) {
        let score = policy::visibility_score(ghosted, graceful);
        prop_assert!(score > 0.0);
        prop_assert!(score <= 1.0);
    }

    #[test]
    fn visibility_score_never_rises_with_ghosting(
        ghosted in 0i64..1_000,
        graceful in 0i64..1_000,
    ) {
        let before = policy::visibility_score(ghosted, graceful);
        let after = policy::visibility_score(ghosted + 1, graceful);
        prop_assert!(after <= before);
    }

    #[test]
    fn visibility_score_strictly_decreases_above_the_floor(
        ghosted in 0i64..10,
        graceful in 0i64..100,
    ) {
        let before = policy::visibility_score(ghosted, graceful);
        let after = policy::visibility_score(ghosted + 1, graceful);
        // scores in this range sit above the floor, so each ghost must cost
        prop_assert!(before > policy::MIN_VISIBILITY);
        prop_assert!(after < before);
    }

    #[test]
    fn visibility_score_never_drops_with_graceful_closures(
        ghosted in 0i64..1_000,
        graceful in 0i64..1_000,
    ) {
        let before = policy::visibility_score(ghosted, graceful);
        let after = policy::visibility_score(ghosted, graceful + 1);
        prop_assert!(after >= before);
    }

    #[test]
    fn graceful_closures_never_fully_erase_ghosting(
        ghosted in 1i64..1_000,
        graceful in 0i64..10_000,
    ) {
        prop_assert!(policy::visibility_score(ghosted, graceful) < 1.0);
    }

    #[test]
    fn admission_agrees_with_remaining_slots(active in 0i64..100) {
        let can_start = policy::can_start_new(active);
        let remaining = policy::remaining_slots(active);
        prop_assert_eq!(can_start, remaining > 0);
        prop_assert!(remaining >= 0);
        prop_assert!(remaining <= policy::MAX_ACTIVE_CONVERSATIONS);
    }

    #[test]
    fn inactivity_windows_partition_cleanly(days in 0i64..60) {
        // a lapsed conversation is never also nudge-eligible
        if policy::is_lapsed(days) {
            prop_assert!(!policy::needs_nudge(days));
            prop_assert!(!policy::needs_escalated_reminder(days));
        }
        // escalation implies the soft-nudge window too
        if policy::needs_escalated_reminder(days) {
            prop_assert!(policy::needs_nudge(days));
        }
    }
}
