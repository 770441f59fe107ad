//! Ghosting RPC Handlers
//!
//! Direct RPC access to the detector and the trust calculator. The
//! scheduled stats job drives these on a cadence; the RPC form exists for
//! admin tooling and for recalculating a single user after a review.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::shared::matching::{CalculateTrustSignalsRequest, TrustSignals};

use super::{detector, trust};

/// Response for `detect_and_record_ghosting`
#[derive(Debug, Serialize)]
pub struct DetectGhostingResponse {
    pub conversations_scanned: usize,
    pub ghosting_events: usize,
}

/// `detect_and_record_ghosting()`
pub async fn detect_and_record_ghosting(
    State(db_pool): State<Option<PgPool>>,
) -> Result<Json<DetectGhostingResponse>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let summary = detector::detect_and_record_ghosting(pool).await.map_err(|e| {
        tracing::error!("Ghosting detection failed: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(DetectGhostingResponse {
        conversations_scanned: summary.conversations_scanned,
        ghosting_events: summary.ghosting_events,
    }))
}

/// `calculate_trust_signals(p_user_id)`
pub async fn calculate_trust_signals(
    State(db_pool): State<Option<PgPool>>,
    Json(params): Json<CalculateTrustSignalsRequest>,
) -> Result<Json<TrustSignals>, StatusCode> {
    let pool = db_pool.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let signals = trust::calculate_trust_signals(pool, params.p_user_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StatusCode::NOT_FOUND,
            _ => {
                tracing::error!("Trust signal calculation failed: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    Ok(Json(signals))
}
