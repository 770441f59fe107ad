//! Policy Constants and Decision Rules
//!
//! The single source of truth for the conversation-limiting policy. Both the
//! client and the server consume these values; the client may use them to
//! render limit text without a round trip, but every admission decision is
//! re-made server-side against live data.
//!
//! Inactivity thresholds are ordered: a conversation first becomes eligible
//! for a soft nudge, later for an escalated reminder, and finally counts as
//! ghosted once it lapses past recovery.

use chrono::{DateTime, Duration, Utc};

/// Maximum number of simultaneously active conversations per user.
///
/// This is a soft cap: it gates starting new conversations, it never forces
/// existing conversations closed.
pub const MAX_ACTIVE_CONVERSATIONS: i64 = 3;

/// A conversation with no activity for this many days stops counting toward
/// the active-conversation quota.
pub const ACTIVE_RECENCY_DAYS: i64 = 14;

/// Days of one-sided silence before a conversation becomes nudge-eligible.
pub const NUDGE_AFTER_DAYS: i64 = 2;

/// Days of one-sided silence before the escalated reminder fires.
pub const REMINDER_AFTER_DAYS: i64 = 5;

/// Days of one-sided silence after which a conversation counts as ghosted.
pub const GHOST_AFTER_DAYS: i64 = 7;

/// Minimum days between soft nudges for the same (user, counterpart) pair.
pub const NUDGE_COOLDOWN_DAYS: i64 = 3;

/// Minimum hours between escalated reminders for the same conversation.
pub const REMINDER_COOLDOWN_HOURS: i64 = 24;

/// How many users the trust-signal recalculation touches per job run.
pub const TRUST_RECALC_BATCH: i64 = 50;

/// Client-side timeout for policy RPC calls, in seconds.
pub const RPC_TIMEOUT_SECS: u64 = 10;

/// Per-ghost multiplicative decay applied to the visibility score.
const GHOST_DECAY: f64 = 0.85;

/// How strongly graceful closures soften the decay exponent.
const GRACEFUL_OFFSET_WEIGHT: f64 = 0.5;

/// Visibility never decays to zero; even a chronic ghoster keeps a sliver
/// of discovery exposure.
pub const MIN_VISIBILITY: f64 = 0.1;

/// Whether a user with `active_count` running conversations may start another.
pub fn can_start_new(active_count: i64) -> bool {
    active_count < MAX_ACTIVE_CONVERSATIONS
}

/// Remaining conversation slots, never negative even if the soft cap was
/// briefly exceeded by a racing admission.
pub fn remaining_slots(active_count: i64) -> i64 {
    (MAX_ACTIVE_CONVERSATIONS - active_count).max(0)
}

/// Pausing is only allowed once every conversation is wrapped up.
pub fn can_pause(active_count: i64) -> bool {
    active_count == 0
}

/// Discovery-visibility multiplier derived from a user's response history.
///
/// Properties relied on elsewhere:
/// - exactly 1.0 when `ghosted_count` is 0
/// - non-increasing as `ghosted_count` grows (graceful count fixed)
/// - non-decreasing as `graceful_closures` grows (ghosted count fixed)
/// - graceful closures soften the decay but never restore a full 1.0
/// - always within `[MIN_VISIBILITY, 1]`
pub fn visibility_score(ghosted_count: i64, graceful_closures: i64) -> f64 {
    let ghosted = ghosted_count.max(0) as f64;
    let graceful = graceful_closures.max(0) as f64;
    let effective = ghosted / (1.0 + GRACEFUL_OFFSET_WEIGHT * graceful);
    GHOST_DECAY.powf(effective).max(MIN_VISIBILITY)
}

/// Whole days elapsed since `last_activity`, never negative.
pub fn days_inactive(last_activity: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_activity).num_days().max(0)
}

/// Nudge-eligible: silent long enough to remind, not yet lapsed.
pub fn needs_nudge(days: i64) -> bool {
    days >= NUDGE_AFTER_DAYS && days < GHOST_AFTER_DAYS
}

/// Escalation-eligible: close to the ghosting cutoff but not past it.
pub fn needs_escalated_reminder(days: i64) -> bool {
    days >= REMINDER_AFTER_DAYS && days < GHOST_AFTER_DAYS
}

/// Lapsed beyond recovery; the detector attributes a ghosting event.
pub fn is_lapsed(days: i64) -> bool {
    days >= GHOST_AFTER_DAYS
}

/// Whether enough time has passed since the last soft nudge to the same
/// (user, counterpart) pair. `None` means no prior nudge is on record.
pub fn nudge_cooldown_elapsed(last_nudge_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_nudge_at {
        Some(at) => now - at >= Duration::days(NUDGE_COOLDOWN_DAYS),
        None => true,
    }
}

/// Whether the conversation-scoped reminder cooldown has elapsed.
pub fn reminder_cooldown_elapsed(
    reminder_sent_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    match reminder_sent_at {
        Some(at) => now - at >= Duration::hours(REMINDER_COOLDOWN_HOURS),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn admission_threshold_is_exactly_the_cap() {
        assert!(can_start_new(0));
        assert!(can_start_new(1));
        assert!(can_start_new(2));
        assert!(!can_start_new(3));
        assert!(!can_start_new(4));
    }

    #[test]
    fn remaining_slots_never_negative() {
        assert_eq!(remaining_slots(0), 3);
        assert_eq!(remaining_slots(3), 0);
        // a racing admission can briefly push past the soft cap
        assert_eq!(remaining_slots(4), 0);
    }

    #[test]
    fn pause_requires_zero_active_conversations() {
        assert!(can_pause(0));
        assert!(!can_pause(1));
        assert!(!can_pause(3));
    }

    #[test]
    fn clean_history_has_full_visibility() {
        assert_eq!(visibility_score(0, 0), 1.0);
        assert_eq!(visibility_score(0, 10), 1.0);
    }

    #[test]
    fn ghosting_decays_visibility() {
        let one = visibility_score(1, 0);
        let two = visibility_score(2, 0);
        assert!(one < 1.0);
        assert!(two < one);
        assert!(two > 0.0);
    }

    #[test]
    fn extreme_ghosting_bottoms_out_at_the_floor() {
        assert_eq!(visibility_score(10_000, 0), MIN_VISIBILITY);
        assert!(visibility_score(10_000, 0) > 0.0);
    }

    #[test]
    fn graceful_closures_soften_but_never_erase() {
        let bare = visibility_score(3, 0);
        let softened = visibility_score(3, 4);
        assert!(softened > bare);
        assert!(softened < 1.0);
    }

    #[test]
    fn inactivity_windows_are_ordered() {
        assert!(!needs_nudge(1));
        assert!(needs_nudge(2));
        assert!(needs_nudge(4));
        assert!(!needs_escalated_reminder(4));
        assert!(needs_escalated_reminder(5));
        assert!(!needs_nudge(7));
        assert!(!needs_escalated_reminder(7));
        assert!(is_lapsed(7));
    }

    #[test]
    fn days_inactive_clamps_clock_skew() {
        let earlier = t("2025-03-01T12:00:00Z");
        let later = t("2025-03-04T12:00:00Z");
        assert_eq!(days_inactive(earlier, later), 3);
        assert_eq!(days_inactive(later, earlier), 0);
    }

    #[test]
    fn nudge_cooldown_windows() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert!(nudge_cooldown_elapsed(None, now));
        assert!(!nudge_cooldown_elapsed(Some(now - Duration::days(2)), now));
        assert!(nudge_cooldown_elapsed(Some(now - Duration::days(3)), now));
    }

    #[test]
    fn reminder_cooldown_windows() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert!(reminder_cooldown_elapsed(None, now));
        assert!(!reminder_cooldown_elapsed(Some(now - Duration::hours(23)), now));
        assert!(reminder_cooldown_elapsed(Some(now - Duration::hours(24)), now));
    }
}
