//! Response Pattern Data Structure
//!
//! One row per user, tracking how they end conversations. Created lazily on
//! the first detection run, mutated only by the ghosting detector and the
//! graceful-closure path, and never deleted. The visibility score is always
//! recomputed from the counters, never set directly by a client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::policy;

/// A user's accumulated response history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponsePattern {
    pub user_id: Uuid,
    /// Times this user went silent until a conversation lapsed
    pub ghosted_count: i64,
    /// Times this user explicitly closed a conversation instead
    pub graceful_closures: i64,
    /// Discovery-exposure multiplier in (0, 1]
    pub visibility_score: f64,
    pub last_calculated_at: Option<DateTime<Utc>>,
}

impl ResponsePattern {
    /// The pattern of a user with no recorded history.
    pub fn fresh(user_id: Uuid) -> Self {
        Self {
            user_id,
            ghosted_count: 0,
            graceful_closures: 0,
            visibility_score: 1.0,
            last_calculated_at: None,
        }
    }

    /// Recompute the visibility score from the current counters.
    pub fn recompute_score(&mut self) {
        self.visibility_score =
            policy::visibility_score(self.ghosted_count, self.graceful_closures);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pattern_has_full_visibility() {
        let pattern = ResponsePattern::fresh(Uuid::new_v4());
        assert_eq!(pattern.ghosted_count, 0);
        assert_eq!(pattern.graceful_closures, 0);
        assert_eq!(pattern.visibility_score, 1.0);
    }

    #[test]
    fn recompute_tracks_counters() {
        let mut pattern = ResponsePattern::fresh(Uuid::new_v4());
        pattern.ghosted_count = 2;
        pattern.recompute_score();
        let ghosted_twice = pattern.visibility_score;
        assert!(ghosted_twice < 1.0);

        pattern.graceful_closures = 3;
        pattern.recompute_score();
        assert!(pattern.visibility_score > ghosted_twice);
        assert!(pattern.visibility_score < 1.0);
    }
}
