//! Pause Mode Types
//!
//! Taking a break from dating is only allowed once every conversation is
//! wrapped up, so the pause flow is check-then-confirm: the client asks
//! `can_pause_dating` first and the server re-validates inside the pause
//! mutation itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named-parameter body shared by the single-user read procedures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdParam {
    pub p_user_id: Uuid,
}

/// Request body for `can_pause_dating`
pub type PauseCheckRequest = UserIdParam;

/// Result of the pause eligibility check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PauseCheck {
    pub can_pause: bool,
    pub active_conversation_count: i64,
}

/// Request to enter pause mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseDatingRequest {
    pub p_user_id: Uuid,
    pub p_reason: Option<String>,
}

/// Response after attempting to pause or resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseDatingResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// Request to leave pause mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDatingRequest {
    pub p_user_id: Uuid,
}
