//! Policy view state
//!
//! Pure derivations from gate snapshots to what the policy UI surfaces
//! should display. No rendering lives here; the app shell maps these states
//! to actual widgets.

use chrono::{DateTime, Utc};

use crate::client::gate::{ConversationStatus, SwipeLimits};
use crate::client::pause::PauseAvailability;

/// State of the conversation-limit banner shown above the matches list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitBannerState {
    /// Check still in flight; render nothing rather than a guess
    Loading,
    /// No active conversations; no banner
    Hidden,
    /// Some slots used; show usage
    Remaining { used: i64, remaining: i64 },
    /// Every slot used; explain why new matches are on hold
    AtLimit,
}

impl LimitBannerState {
    pub fn from_status(status: &ConversationStatus) -> Self {
        if status.active_count == 0 {
            LimitBannerState::Hidden
        } else if status.remaining_slots == 0 {
            LimitBannerState::AtLimit
        } else {
            LimitBannerState::Remaining {
                used: status.active_count,
                remaining: status.remaining_slots,
            }
        }
    }
}

/// State of the full-screen overlay blocking the swipe deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeOverlayState {
    pub visible: bool,
    pub active_count: i64,
    pub max_conversations: i64,
    pub remaining_slots: i64,
}

impl SwipeOverlayState {
    pub fn from_limits(limits: &SwipeLimits, max_conversations: i64) -> Self {
        Self {
            visible: !limits.can_swipe,
            active_count: limits.active_count,
            max_conversations,
            remaining_slots: limits.remaining_slots,
        }
    }
}

/// State of the pause-mode dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseDialogState {
    /// Eligible; show the confirm flow with reason selection
    Confirmable,
    /// Not eligible; offer a jump to the conversations list instead
    RedirectToConversations { active_count: i64 },
    /// Eligibility unknown; keep the pause action disabled
    Disabled,
}

impl PauseDialogState {
    pub fn from_availability(availability: &PauseAvailability) -> Self {
        match availability {
            PauseAvailability::Available => PauseDialogState::Confirmable,
            PauseAvailability::Blocked { active_count } => {
                PauseDialogState::RedirectToConversations {
                    active_count: *active_count,
                }
            }
            PauseAvailability::Unavailable => PauseDialogState::Disabled,
        }
    }
}

/// State of the overlay shown while the user's own profile is paused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PausedOverlayState {
    pub visible: bool,
    pub reason: Option<String>,
    pub since: Option<DateTime<Utc>>,
}

impl PausedOverlayState {
    pub fn from_profile(
        is_paused: bool,
        pause_reason: Option<String>,
        paused_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            visible: is_paused,
            reason: if is_paused { pause_reason } else { None },
            since: if is_paused { paused_at } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::policy;

    fn status(active: i64) -> ConversationStatus {
        ConversationStatus {
            active_count: active,
            can_start_new: policy::can_start_new(active),
            remaining_slots: policy::remaining_slots(active),
            max_conversations: policy::MAX_ACTIVE_CONVERSATIONS,
        }
    }

    #[test]
    fn banner_hidden_with_no_conversations() {
        assert_eq!(
            LimitBannerState::from_status(&status(0)),
            LimitBannerState::Hidden
        );
    }

    #[test]
    fn banner_shows_usage_mid_range() {
        assert_eq!(
            LimitBannerState::from_status(&status(2)),
            LimitBannerState::Remaining {
                used: 2,
                remaining: 1
            }
        );
    }

    #[test]
    fn banner_flags_the_cap() {
        assert_eq!(
            LimitBannerState::from_status(&status(3)),
            LimitBannerState::AtLimit
        );
    }

    #[test]
    fn overlay_appears_exactly_at_capacity() {
        let open = SwipeLimits {
            can_swipe: true,
            active_count: 2,
            remaining_slots: 1,
        };
        assert!(!SwipeOverlayState::from_limits(&open, 3).visible);

        let full = SwipeLimits {
            can_swipe: false,
            active_count: 3,
            remaining_slots: 0,
        };
        let overlay = SwipeOverlayState::from_limits(&full, 3);
        assert!(overlay.visible);
        assert_eq!(overlay.active_count, 3);
        assert_eq!(overlay.max_conversations, 3);
        assert_eq!(overlay.remaining_slots, 0);
    }

    #[test]
    fn pause_dialog_redirects_when_blocked() {
        let blocked = PauseAvailability::Blocked { active_count: 2 };
        assert_eq!(
            PauseDialogState::from_availability(&blocked),
            PauseDialogState::RedirectToConversations { active_count: 2 }
        );
    }

    #[test]
    fn pause_dialog_disabled_when_unverified() {
        assert_eq!(
            PauseDialogState::from_availability(&PauseAvailability::Unavailable),
            PauseDialogState::Disabled
        );
    }

    #[test]
    fn paused_overlay_strips_fields_when_not_paused() {
        let hidden =
            PausedOverlayState::from_profile(false, Some("taking a break".to_string()), None);
        assert!(!hidden.visible);
        assert_eq!(hidden.reason, None);
    }
}
