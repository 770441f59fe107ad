//! Fail-closed pause gate
//!
//! Pausing has a precondition (no active conversations), so this gate is
//! the opposite of the browse gates: when the check cannot be verified the
//! pause action stays disabled. A blocked check carries the live count so
//! the UI can send the user to their conversations list instead of showing
//! a dead button.

use uuid::Uuid;

use crate::client::config::Config;
use crate::client::rpc::{ClientError, PolicyRpcClient};

/// Result of the client-side pause eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAvailability {
    /// Zero active conversations; the pause action may proceed
    Available,
    /// Active conversations remain; direct the user to wrap them up
    Blocked { active_count: i64 },
    /// The check could not be verified; keep the pause action disabled
    Unavailable,
}

/// Outcome of an attempted pause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PauseOutcome {
    Paused,
    /// The server re-validation rejected the pause
    Rejected { message: String },
}

/// Fail-closed pause gate
pub struct PauseGate {
    rpc: PolicyRpcClient,
}

impl PauseGate {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        Ok(Self {
            rpc: PolicyRpcClient::new(config)?,
        })
    }

    /// Check pause eligibility. Errors fail closed.
    pub async fn check(&self, user_id: Uuid) -> PauseAvailability {
        match self.rpc.can_pause_dating(user_id).await {
            Ok(check) if check.can_pause => PauseAvailability::Available,
            Ok(check) => PauseAvailability::Blocked {
                active_count: check.active_conversation_count,
            },
            Err(e) => {
                tracing::warn!("Pause check failed, keeping pause disabled: {}", e);
                PauseAvailability::Unavailable
            }
        }
    }

    /// Enter pause mode. The server re-validates regardless of what the
    /// preceding check said, so a stale `Available` cannot force a pause.
    pub async fn pause(
        &self,
        user_id: Uuid,
        reason: Option<String>,
    ) -> Result<PauseOutcome, ClientError> {
        let response = self.rpc.pause_dating(user_id, reason).await?;
        if response.success {
            Ok(PauseOutcome::Paused)
        } else {
            Ok(PauseOutcome::Rejected {
                message: response
                    .error
                    .unwrap_or_else(|| "Pause was rejected".to_string()),
            })
        }
    }

    /// Leave pause mode.
    pub async fn resume(&self, user_id: Uuid) -> Result<bool, ClientError> {
        let response = self.rpc.resume_dating(user_id).await?;
        Ok(response.success)
    }
}
