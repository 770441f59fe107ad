//! Fail-open browse gates
//!
//! Read-through checks the UI consults on mount and on demand. They never
//! block the app: any RPC failure degrades to the permissive answer with a
//! log line, because the server re-validates every real action anyway. The
//! worst a wrong optimistic answer can do is show a start-conversation
//! button that the server then politely declines.

use uuid::Uuid;

use crate::client::config::Config;
use crate::client::rpc::{ClientError, PolicyRpcClient};
use crate::shared::policy;

/// Snapshot of a user's standing against the conversation cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationStatus {
    pub active_count: i64,
    pub can_start_new: bool,
    pub remaining_slots: i64,
    pub max_conversations: i64,
}

impl ConversationStatus {
    /// The permissive default used when the backend cannot be reached.
    pub fn permissive() -> Self {
        Self {
            active_count: 0,
            can_start_new: true,
            remaining_slots: policy::MAX_ACTIVE_CONVERSATIONS,
            max_conversations: policy::MAX_ACTIVE_CONVERSATIONS,
        }
    }

    fn from_count(active_count: i64, can_start_new: bool) -> Self {
        Self {
            active_count,
            can_start_new,
            remaining_slots: policy::remaining_slots(active_count),
            max_conversations: policy::MAX_ACTIVE_CONVERSATIONS,
        }
    }
}

/// Snapshot driving the swipe deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeLimits {
    pub can_swipe: bool,
    pub active_count: i64,
    pub remaining_slots: i64,
}

impl SwipeLimits {
    /// The permissive default used when the backend cannot be reached.
    pub fn permissive() -> Self {
        Self {
            can_swipe: true,
            active_count: 0,
            remaining_slots: policy::MAX_ACTIVE_CONVERSATIONS,
        }
    }
}

/// Fail-open policy gate
pub struct PolicyGate {
    rpc: PolicyRpcClient,
}

impl PolicyGate {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        Ok(Self {
            rpc: PolicyRpcClient::new(config)?,
        })
    }

    /// Current conversation standing. Refreshing is just calling again.
    pub async fn conversation_status(&self, user_id: Uuid) -> ConversationStatus {
        let active_count = match self.rpc.get_active_conversation_count(user_id).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Conversation count check failed, failing open: {}", e);
                return ConversationStatus::permissive();
            }
        };

        // The server's admission verdict is authoritative; if only this
        // half fails, mirror the rule locally from the count we do have.
        let can_start_new = match self.rpc.can_start_new_conversation(user_id).await {
            Ok(allowed) => allowed,
            Err(e) => {
                tracing::warn!("Admission check failed, deriving from count: {}", e);
                policy::can_start_new(active_count)
            }
        };

        ConversationStatus::from_count(active_count, can_start_new)
    }

    /// Whether the swipe deck should keep dealing cards.
    pub async fn swipe_limits(&self, user_id: Uuid) -> SwipeLimits {
        let status = self.conversation_status(user_id).await;
        SwipeLimits {
            can_swipe: status.can_start_new,
            active_count: status.active_count,
            remaining_slots: status.remaining_slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_defaults_are_fully_open() {
        let status = ConversationStatus::permissive();
        assert!(status.can_start_new);
        assert_eq!(status.remaining_slots, policy::MAX_ACTIVE_CONVERSATIONS);

        let limits = SwipeLimits::permissive();
        assert!(limits.can_swipe);
    }

    #[test]
    fn status_derives_remaining_slots() {
        let status = ConversationStatus::from_count(2, true);
        assert_eq!(status.remaining_slots, 1);
        assert_eq!(status.max_conversations, 3);

        let full = ConversationStatus::from_count(3, false);
        assert_eq!(full.remaining_slots, 0);
        assert!(!full.can_start_new);
    }
}
