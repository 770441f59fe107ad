//! Trust Signal Data Structure
//!
//! Per-user boolean badges shown on profiles, derived from the response
//! pattern and account facts. Recomputed server-side only; read-only to
//! clients. Derivation is a pure function of stored state, so recalculating
//! is always safe and idempotent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::response_pattern::ResponsePattern;

/// Badge thresholds. The score cutoffs are deliberately close to 1.0: a
/// single ghosted conversation already clears "shows up consistently" and
/// two clear "communicates with care".
const CARE_MAX_GHOSTED: i64 = 1;
const CARE_MIN_SCORE: f64 = 0.85;
const TRUSTED_MIN_SCORE: f64 = 0.95;
const TRUSTED_MIN_ACCOUNT_AGE_DAYS: i64 = 30;
const CLOSER_MIN_CLOSURES: i64 = 2;

/// Per-user trust badges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrustSignals {
    pub user_id: Uuid,
    /// No ghosted conversations on record
    pub shows_up_consistently: bool,
    /// At most minor lapses, visibility essentially intact
    pub communicates_with_care: bool,
    /// Spotless record on an established account
    pub community_trusted: bool,
    /// Identity verification completed
    pub verified_identity: bool,
    /// Habitually closes conversations instead of going silent
    pub thoughtful_closer: bool,
    pub calculated_at: Option<DateTime<Utc>>,
}

impl TrustSignals {
    /// Derive all badges from a user's response pattern and account facts.
    pub fn derive(
        pattern: &ResponsePattern,
        identity_verified: bool,
        account_age_days: i64,
    ) -> Self {
        Self {
            user_id: pattern.user_id,
            shows_up_consistently: pattern.ghosted_count == 0,
            communicates_with_care: pattern.ghosted_count <= CARE_MAX_GHOSTED
                && pattern.visibility_score >= CARE_MIN_SCORE,
            community_trusted: pattern.ghosted_count == 0
                && pattern.visibility_score >= TRUSTED_MIN_SCORE
                && account_age_days >= TRUSTED_MIN_ACCOUNT_AGE_DAYS,
            verified_identity: identity_verified,
            thoughtful_closer: pattern.graceful_closures >= CLOSER_MIN_CLOSURES
                && pattern.graceful_closures > pattern.ghosted_count,
            calculated_at: None,
        }
    }
}

/// Request to recalculate one user's trust signals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateTrustSignalsRequest {
    pub p_user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(ghosted: i64, graceful: i64) -> ResponsePattern {
        let mut p = ResponsePattern::fresh(Uuid::new_v4());
        p.ghosted_count = ghosted;
        p.graceful_closures = graceful;
        p.recompute_score();
        p
    }

    #[test]
    fn clean_established_account_earns_everything_but_verification() {
        let signals = TrustSignals::derive(&pattern(0, 3), false, 90);
        assert!(signals.shows_up_consistently);
        assert!(signals.communicates_with_care);
        assert!(signals.community_trusted);
        assert!(signals.thoughtful_closer);
        assert!(!signals.verified_identity);
    }

    #[test]
    fn single_ghost_loses_consistency_but_not_care() {
        let signals = TrustSignals::derive(&pattern(1, 0), true, 90);
        assert!(!signals.shows_up_consistently);
        assert!(signals.communicates_with_care);
        assert!(!signals.community_trusted);
        assert!(signals.verified_identity);
    }

    #[test]
    fn repeat_ghosting_loses_care() {
        let signals = TrustSignals::derive(&pattern(4, 0), false, 90);
        assert!(!signals.communicates_with_care);
    }

    #[test]
    fn new_accounts_are_not_community_trusted() {
        let signals = TrustSignals::derive(&pattern(0, 0), false, 5);
        assert!(signals.shows_up_consistently);
        assert!(!signals.community_trusted);
    }

    #[test]
    fn thoughtful_closer_needs_more_closures_than_ghosts() {
        assert!(TrustSignals::derive(&pattern(0, 2), false, 0).thoughtful_closer);
        assert!(!TrustSignals::derive(&pattern(0, 1), false, 0).thoughtful_closer);
        assert!(!TrustSignals::derive(&pattern(3, 3), false, 0).thoughtful_closer);
        assert!(TrustSignals::derive(&pattern(2, 5), false, 0).thoughtful_closer);
    }

    #[test]
    fn derivation_is_idempotent() {
        let p = pattern(2, 1);
        let first = TrustSignals::derive(&p, true, 45);
        let second = TrustSignals::derive(&p, true, 45);
        assert_eq!(first, second);
    }
}
