//! Conversation Data Structure
//!
//! Represents a conversation between two matched users, with an explicit
//! lifecycle stage. The stage, together with a recency window, decides
//! whether the conversation counts toward the owner's active-conversation
//! quota, and it doubles as the idempotence marker for the batch jobs: once
//! a conversation has left the live stages, the detector and the nudge
//! dispatcher skip it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chrono::{DateTime, Utc};

/// Lifecycle stage of a conversation.
///
/// Transitions:
///
/// ```text
/// Active <-> NudgeSent          (reminder sent / reply received)
/// Active | NudgeSent -> Ghosted (detector attributes a lapse)
/// Active | NudgeSent -> ClosedGracefully
/// Active | NudgeSent -> Archived
/// ```
///
/// `Ghosted`, `ClosedGracefully`, and `Archived` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    /// Both parties may still reply; counts toward the quota
    Active,
    /// A reminder went out; still live and still counted
    NudgeSent,
    /// Lapsed past recovery; a ghosting event was recorded
    Ghosted,
    /// Explicitly ended by a participant
    ClosedGracefully,
    /// Hidden away by a participant
    Archived,
}

impl Default for ConversationStage {
    fn default() -> Self {
        ConversationStage::Active
    }
}

impl ConversationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStage::Active => "active",
            ConversationStage::NudgeSent => "nudge_sent",
            ConversationStage::Ghosted => "ghosted",
            ConversationStage::ClosedGracefully => "closed_gracefully",
            ConversationStage::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(ConversationStage::Active),
            "nudge_sent" => Some(ConversationStage::NudgeSent),
            "ghosted" => Some(ConversationStage::Ghosted),
            "closed_gracefully" => Some(ConversationStage::ClosedGracefully),
            "archived" => Some(ConversationStage::Archived),
            _ => None,
        }
    }

    /// Whether this conversation is still live (neither closed, archived,
    /// nor ghosted). Only live conversations count toward the quota and are
    /// visible to the batch jobs.
    pub fn is_live(&self) -> bool {
        matches!(self, ConversationStage::Active | ConversationStage::NudgeSent)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: ConversationStage) -> bool {
        use ConversationStage::*;
        match (self, next) {
            (Active, NudgeSent) => true,
            (NudgeSent, Active) => true,
            (Active | NudgeSent, Ghosted) => true,
            (Active | NudgeSent, ClosedGracefully) => true,
            (Active | NudgeSent, Archived) => true,
            _ => false,
        }
    }
}

/// Represents a conversation between two matched users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: Uuid,
    /// First participant
    pub user_a: Uuid,
    /// Second participant
    pub user_b: Uuid,
    /// Current lifecycle stage
    #[serde(default)]
    pub stage: ConversationStage,
    /// When the match was formed
    pub created_at: DateTime<Utc>,
    /// When the most recent message arrived, if any
    pub last_message_at: Option<DateTime<Utc>>,
    /// Who sent the most recent message
    pub last_sender_id: Option<Uuid>,
    /// When the last escalated reminder for this conversation went out
    pub reminder_sent_at: Option<DateTime<Utc>>,
    /// The silent party, once a ghosting event was attributed
    pub ghosted_by: Option<Uuid>,
}

impl Conversation {
    /// Check if user is a participant
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// Get the other participant
    pub fn other_participant(&self, current_user_id: Uuid) -> Option<Uuid> {
        if self.user_a == current_user_id {
            Some(self.user_b)
        } else if self.user_b == current_user_id {
            Some(self.user_a)
        } else {
            None
        }
    }

    /// The participant who has not replied to the most recent message.
    ///
    /// Returns `None` when no message has been sent yet; silence in a
    /// conversation with no messages is nobody's fault.
    pub fn silent_party(&self) -> Option<Uuid> {
        self.last_sender_id.and_then(|sender| self.other_participant(sender))
    }
}

/// One conversation in need of a reminder, as returned by the
/// conversations-needing-nudge query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NudgeCandidate {
    pub conversation_id: Uuid,
    /// The participant who owes a reply
    pub user_to_nudge: Uuid,
    /// The participant who is waiting
    pub other_user_id: Uuid,
    /// Display name of the waiting participant
    pub other_user_name: String,
    pub last_message_at: DateTime<Utc>,
    pub days_inactive: i64,
}

/// Request to start a conversation with a new match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversationRequest {
    pub p_user_id: Uuid,
    pub p_other_user_id: Uuid,
}

/// Response after attempting to start a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversationResponse {
    pub success: bool,
    pub conversation_id: Option<Uuid>,
    /// The caller's active-conversation count at decision time
    pub active_count: i64,
    pub error: Option<String>,
}

/// Request to send a message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub p_conversation_id: Uuid,
    pub p_sender_id: Uuid,
    pub p_content: String,
}

/// Response after sending a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message_id: Option<Uuid>,
    pub error: Option<String>,
}

/// Request to close or archive a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationActionRequest {
    pub p_conversation_id: Uuid,
    pub p_user_id: Uuid,
}

/// Response after closing or archiving a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationActionResponse {
    pub success: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(last_sender: Option<Uuid>) -> (Conversation, Uuid, Uuid) {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let conv = Conversation {
            id: Uuid::new_v4(),
            user_a: a,
            user_b: b,
            stage: ConversationStage::Active,
            created_at: Utc::now(),
            last_message_at: None,
            last_sender_id: last_sender,
            reminder_sent_at: None,
            ghosted_by: None,
        };
        (conv, a, b)
    }

    #[test]
    fn stage_round_trips_through_strings() {
        for stage in [
            ConversationStage::Active,
            ConversationStage::NudgeSent,
            ConversationStage::Ghosted,
            ConversationStage::ClosedGracefully,
            ConversationStage::Archived,
        ] {
            assert_eq!(ConversationStage::from_str(stage.as_str()), Some(stage));
        }
        assert_eq!(ConversationStage::from_str("deleted"), None);
    }

    #[test]
    fn only_live_stages_count() {
        assert!(ConversationStage::Active.is_live());
        assert!(ConversationStage::NudgeSent.is_live());
        assert!(!ConversationStage::Ghosted.is_live());
        assert!(!ConversationStage::ClosedGracefully.is_live());
        assert!(!ConversationStage::Archived.is_live());
    }

    #[test]
    fn terminal_stages_have_no_exits() {
        use ConversationStage::*;
        for terminal in [Ghosted, ClosedGracefully, Archived] {
            for next in [Active, NudgeSent, Ghosted, ClosedGracefully, Archived] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn reply_revives_a_nudged_conversation() {
        assert!(ConversationStage::NudgeSent.can_transition_to(ConversationStage::Active));
        assert!(!ConversationStage::Active.can_transition_to(ConversationStage::Active));
    }

    #[test]
    fn silent_party_is_the_non_sender() {
        let (mut conv, a, b) = conversation(None);
        assert_eq!(conv.silent_party(), None);

        conv.last_sender_id = Some(a);
        assert_eq!(conv.silent_party(), Some(b));

        conv.last_sender_id = Some(b);
        assert_eq!(conv.silent_party(), Some(a));
    }

    #[test]
    fn other_participant_requires_membership() {
        let (conv, a, b) = conversation(None);
        assert_eq!(conv.other_participant(a), Some(b));
        assert_eq!(conv.other_participant(b), Some(a));
        assert_eq!(conv.other_participant(Uuid::new_v4()), None);
    }
}
