//! Notification Data Structure
//!
//! Nudge and reminder notifications written by the dispatcher jobs. The
//! `related_user_id` ties a nudge to the counterpart who is waiting, which
//! is also the key the pair-scoped cooldown scan uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of policy notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Early, gentle reminder to reply
    Nudge,
    /// Escalated reminder close to the ghosting cutoff
    GhostingReminder,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Nudge => "nudge",
            NotificationKind::GhostingReminder => "ghosting_reminder",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "nudge" => Some(NotificationKind::Nudge),
            "ghosting_reminder" => Some(NotificationKind::GhostingReminder),
            _ => None,
        }
    }
}

/// A notification delivered to a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// The counterpart this notification is about
    pub related_user_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in [NotificationKind::Nudge, NotificationKind::GhostingReminder] {
            assert_eq!(NotificationKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationKind::from_str("marketing"), None);
    }

    #[test]
    fn kind_serializes_as_type_field() {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: NotificationKind::GhostingReminder,
            title: "t".to_string(),
            message: "m".to_string(),
            related_user_id: None,
            read: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "ghosting_reminder");
    }
}
