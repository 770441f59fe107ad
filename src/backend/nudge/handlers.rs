//! Nudge RPC Handlers

use axum::{extract::State, http::StatusCode, Json};
use sqlx::PgPool;

use crate::shared::matching::NudgeCandidate;

use super::db;

/// `get_conversations_needing_nudge() -> table(...)`
pub async fn get_conversations_needing_nudge(
    State(db_pool): State<Option<PgPool>>,
) -> Result<Json<Vec<NudgeCandidate>>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let candidates = db::conversations_needing_nudge(pool).await.map_err(|e| {
        tracing::error!("Failed to query nudge candidates: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(candidates))
}
