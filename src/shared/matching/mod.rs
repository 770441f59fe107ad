//! Matching Module
//!
//! This module contains the data structures for the conversation-limiting
//! and anti-ghosting system:
//!
//! - `Conversation` - A conversation between two matched users, with an
//!   explicit lifecycle stage
//! - `ResponsePattern` - A user's accumulated ghosting history and
//!   visibility score
//! - `TrustSignals` - Behavioral badges derived from the response pattern
//! - `Notification` - Nudge and reminder notifications
//! - Pause types - Checking and entering pause mode

pub mod conversation;
pub mod response_pattern;
pub mod trust;
pub mod notification;
pub mod pause;

// Re-export all types
pub use conversation::{
    Conversation, ConversationStage, NudgeCandidate, StartConversationRequest,
    StartConversationResponse, SendMessageRequest, SendMessageResponse,
    ConversationActionRequest, ConversationActionResponse,
};
pub use response_pattern::ResponsePattern;
pub use trust::{TrustSignals, CalculateTrustSignalsRequest};
pub use notification::{Notification, NotificationKind};
pub use pause::{
    PauseCheck, PauseCheckRequest, PauseDatingRequest, PauseDatingResponse,
    ResumeDatingRequest, UserIdParam,
};
