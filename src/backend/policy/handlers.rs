//! Policy RPC Handlers
//!
//! HTTP handlers for the conversation policy procedures. Each procedure is
//! invoked by name with named parameters (`p_user_id` and friends) and
//! returns plain JSON, so the app client can call them like stored
//! procedures.
//!
//! All handlers answer 503 while the database is unavailable; the client
//! treats that as any other transient failure (fail open for browse checks,
//! fail closed for pause).

use axum::{extract::State, http::StatusCode, Json};
use sqlx::PgPool;

use crate::shared::matching::{
    ConversationActionRequest, ConversationActionResponse, PauseCheck, PauseDatingRequest,
    PauseDatingResponse, ResumeDatingRequest, SendMessageRequest, SendMessageResponse,
    StartConversationRequest, StartConversationResponse, UserIdParam,
};
use crate::shared::policy;

use super::db;

/// `get_active_conversation_count(p_user_id) -> integer`
pub async fn get_active_conversation_count(
    State(db_pool): State<Option<PgPool>>,
    Json(params): Json<UserIdParam>,
) -> Result<Json<i64>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let count = db::active_conversation_count(pool, params.p_user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count active conversations: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(count))
}

/// `can_start_new_conversation(p_user_id) -> boolean`
pub async fn can_start_new_conversation(
    State(db_pool): State<Option<PgPool>>,
    Json(params): Json<UserIdParam>,
) -> Result<Json<bool>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let allowed = db::can_start_new_conversation(pool, params.p_user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to evaluate admission check: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(allowed))
}

/// `can_pause_dating(p_user_id) -> {can_pause, active_conversation_count}`
pub async fn can_pause_dating(
    State(db_pool): State<Option<PgPool>>,
    Json(params): Json<UserIdParam>,
) -> Result<Json<PauseCheck>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let check = db::pause_check(pool, params.p_user_id).await.map_err(|e| {
        tracing::error!("Failed to evaluate pause check: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(check))
}

/// Start a conversation with a new match.
///
/// Check-then-act: the admission check and the insert are separate
/// statements, so two racing starts can both pass. The cap is a soft
/// limit; see the policy store for the full note.
pub async fn start_conversation(
    State(db_pool): State<Option<PgPool>>,
    Json(request): Json<StartConversationRequest>,
) -> Result<Json<StartConversationResponse>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    if request.p_user_id == request.p_other_user_id {
        return Ok(Json(StartConversationResponse {
            success: false,
            conversation_id: None,
            active_count: 0,
            error: Some("Cannot start a conversation with yourself".to_string()),
        }));
    }

    let active_count = db::active_conversation_count(pool, request.p_user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count active conversations: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if !policy::can_start_new(active_count) {
        return Ok(Json(StartConversationResponse {
            success: false,
            conversation_id: None,
            active_count,
            error: Some("Conversation limit reached".to_string()),
        }));
    }

    let conversation_id =
        db::create_conversation(pool, request.p_user_id, request.p_other_user_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create conversation: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;

    Ok(Json(StartConversationResponse {
        success: true,
        conversation_id: Some(conversation_id),
        active_count: active_count + 1,
        error: None,
    }))
}

/// Append a message to a live conversation
pub async fn send_message(
    State(db_pool): State<Option<PgPool>>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let conversation = db::get_conversation(pool, request.p_conversation_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load conversation: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let conversation = match conversation {
        Some(c) => c,
        None => {
            return Ok(Json(SendMessageResponse {
                success: false,
                message_id: None,
                error: Some("Conversation not found".to_string()),
            }));
        }
    };

    if !conversation.has_participant(request.p_sender_id) {
        return Err(StatusCode::FORBIDDEN);
    }

    if !conversation.stage.is_live() {
        return Ok(Json(SendMessageResponse {
            success: false,
            message_id: None,
            error: Some("Conversation is no longer open".to_string()),
        }));
    }

    let message_id = db::record_message(
        pool,
        request.p_conversation_id,
        request.p_sender_id,
        &request.p_content,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to store message: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(SendMessageResponse {
        success: true,
        message_id: Some(message_id),
        error: None,
    }))
}

/// Close a conversation gracefully instead of going silent
pub async fn close_conversation(
    State(db_pool): State<Option<PgPool>>,
    Json(request): Json<ConversationActionRequest>,
) -> Result<Json<ConversationActionResponse>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let closed =
        db::close_conversation_gracefully(pool, request.p_conversation_id, request.p_user_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to close conversation: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;

    Ok(Json(ConversationActionResponse {
        success: closed,
        error: if closed {
            None
        } else {
            Some("Conversation is not open".to_string())
        },
    }))
}

/// Archive a conversation
pub async fn archive_conversation(
    State(db_pool): State<Option<PgPool>>,
    Json(request): Json<ConversationActionRequest>,
) -> Result<Json<ConversationActionResponse>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let archived = db::archive_conversation(pool, request.p_conversation_id, request.p_user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to archive conversation: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(ConversationActionResponse {
        success: archived,
        error: if archived {
            None
        } else {
            Some("Conversation is not open".to_string())
        },
    }))
}

/// Enter pause mode. The zero-active-conversations rule is re-validated
/// here regardless of what the client's earlier check said.
pub async fn pause_dating(
    State(db_pool): State<Option<PgPool>>,
    Json(request): Json<PauseDatingRequest>,
) -> Result<Json<PauseDatingResponse>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let paused = db::pause_dating(pool, request.p_user_id, request.p_reason.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to pause dating: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(PauseDatingResponse {
        success: paused,
        error: if paused {
            None
        } else {
            Some("Wrap up your active conversations before pausing".to_string())
        },
    }))
}

/// Leave pause mode
pub async fn resume_dating(
    State(db_pool): State<Option<PgPool>>,
    Json(request): Json<ResumeDatingRequest>,
) -> Result<Json<PauseDatingResponse>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let resumed = db::resume_dating(pool, request.p_user_id).await.map_err(|e| {
        tracing::error!("Failed to resume dating: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(PauseDatingResponse {
        success: resumed,
        error: if resumed {
            None
        } else {
            Some("Profile not found".to_string())
        },
    }))
}
