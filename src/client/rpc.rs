//! Policy RPC Client
//!
//! This module provides async functions for invoking the policy procedures
//! by name with named parameters. Calls are bounded by a request timeout so
//! a wedged backend degrades into the gates' failure handling instead of
//! hanging the UI task.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::client::config::Config;
use crate::shared::matching::{
    CalculateTrustSignalsRequest, ConversationActionRequest, ConversationActionResponse,
    NudgeCandidate, PauseCheck, PauseDatingRequest, PauseDatingResponse, ResumeDatingRequest,
    SendMessageRequest, SendMessageResponse, StartConversationRequest,
    StartConversationResponse, TrustSignals, UserIdParam,
};
use crate::shared::policy;

/// Client-side RPC failure
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure or timeout
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned status {0}")]
    Status(u16),
}

/// Policy RPC client
pub struct PolicyRpcClient {
    config: Config,
    client: reqwest::Client,
}

impl PolicyRpcClient {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(policy::RPC_TIMEOUT_SECS))
            .build()?;
        Ok(Self { config, client })
    }

    /// Invoke a procedure by name with named parameters
    async fn call<P, R>(&self, procedure: &str, params: &P) -> Result<R, ClientError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.api_url(&format!("/rpc/{}", procedure));

        let response = self.client.post(&url).json(params).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    /// `get_active_conversation_count(p_user_id)`
    pub async fn get_active_conversation_count(&self, user_id: Uuid) -> Result<i64, ClientError> {
        self.call(
            "get_active_conversation_count",
            &UserIdParam { p_user_id: user_id },
        )
        .await
    }

    /// `can_start_new_conversation(p_user_id)`
    pub async fn can_start_new_conversation(&self, user_id: Uuid) -> Result<bool, ClientError> {
        self.call(
            "can_start_new_conversation",
            &UserIdParam { p_user_id: user_id },
        )
        .await
    }

    /// `can_pause_dating(p_user_id)`
    pub async fn can_pause_dating(&self, user_id: Uuid) -> Result<PauseCheck, ClientError> {
        self.call("can_pause_dating", &UserIdParam { p_user_id: user_id })
            .await
    }

    /// `get_conversations_needing_nudge()`
    pub async fn get_conversations_needing_nudge(
        &self,
    ) -> Result<Vec<NudgeCandidate>, ClientError> {
        self.call("get_conversations_needing_nudge", &serde_json::json!({}))
            .await
    }

    /// `calculate_trust_signals(p_user_id)`
    pub async fn calculate_trust_signals(
        &self,
        user_id: Uuid,
    ) -> Result<TrustSignals, ClientError> {
        self.call(
            "calculate_trust_signals",
            &CalculateTrustSignalsRequest { p_user_id: user_id },
        )
        .await
    }

    /// Start a conversation with a new match
    pub async fn start_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<StartConversationResponse, ClientError> {
        self.call(
            "start_conversation",
            &StartConversationRequest {
                p_user_id: user_id,
                p_other_user_id: other_user_id,
            },
        )
        .await
    }

    /// Send a message in a conversation
    pub async fn send_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<SendMessageResponse, ClientError> {
        self.call(
            "send_message",
            &SendMessageRequest {
                p_conversation_id: conversation_id,
                p_sender_id: sender_id,
                p_content: content.to_string(),
            },
        )
        .await
    }

    /// Close a conversation gracefully
    pub async fn close_conversation(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<ConversationActionResponse, ClientError> {
        self.call(
            "close_conversation",
            &ConversationActionRequest {
                p_conversation_id: conversation_id,
                p_user_id: user_id,
            },
        )
        .await
    }

    /// Enter pause mode
    pub async fn pause_dating(
        &self,
        user_id: Uuid,
        reason: Option<String>,
    ) -> Result<PauseDatingResponse, ClientError> {
        self.call(
            "pause_dating",
            &PauseDatingRequest {
                p_user_id: user_id,
                p_reason: reason,
            },
        )
        .await
    }

    /// Leave pause mode
    pub async fn resume_dating(&self, user_id: Uuid) -> Result<PauseDatingResponse, ClientError> {
        self.call("resume_dating", &ResumeDatingRequest { p_user_id: user_id })
            .await
    }
}
