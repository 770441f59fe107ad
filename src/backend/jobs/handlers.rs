//! Scheduled job endpoints
//!
//! Each endpoint takes no request body and answers with a success flag, the
//! run's summary counts, and a timestamp. Partial failures inside a batch
//! were already logged and skipped by the job itself, so they still produce
//! `success: true` with partial counts; only total failure (nothing could
//! be fetched, or no database) yields a 500 with an error message.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::backend::error::BackendError;
use crate::backend::ghosting;
use crate::backend::nudge;
use crate::shared::policy;

/// Error body shared by all job endpoints
#[derive(Debug, Serialize)]
pub struct JobErrorResponse {
    pub success: bool,
    pub error: String,
}

type JobFailure = (StatusCode, Json<JobErrorResponse>);

fn total_failure(err: BackendError) -> JobFailure {
    (
        err.status_code(),
        Json(JobErrorResponse {
            success: false,
            error: err.message(),
        }),
    )
}

/// Response for the soft-nudge job
#[derive(Debug, Serialize)]
pub struct NudgeJobResponse {
    pub success: bool,
    pub nudges_sent: usize,
    pub timestamp: DateTime<Utc>,
}

/// `POST /jobs/send-conversation-nudges`
pub async fn run_send_conversation_nudges(
    State(db_pool): State<Option<PgPool>>,
) -> Result<Json<NudgeJobResponse>, JobFailure> {
    let pool = db_pool
        .as_ref()
        .ok_or_else(|| total_failure(BackendError::job("database unavailable")))?;

    let summary = nudge::send_conversation_nudges(pool).await.map_err(|e| {
        tracing::error!("Nudge job failed before processing: {:?}", e);
        total_failure(BackendError::from(e))
    })?;

    Ok(Json(NudgeJobResponse {
        success: true,
        nudges_sent: summary.nudges_sent,
        timestamp: Utc::now(),
    }))
}

/// Response for the escalated-reminder job
#[derive(Debug, Serialize)]
pub struct ReminderJobResponse {
    pub success: bool,
    pub reminders_sent: usize,
    pub timestamp: DateTime<Utc>,
}

/// `POST /jobs/send-ghosting-reminder`
pub async fn run_send_ghosting_reminder(
    State(db_pool): State<Option<PgPool>>,
) -> Result<Json<ReminderJobResponse>, JobFailure> {
    let pool = db_pool
        .as_ref()
        .ok_or_else(|| total_failure(BackendError::job("database unavailable")))?;

    let summary = nudge::send_ghosting_reminders(pool).await.map_err(|e| {
        tracing::error!("Reminder job failed before processing: {:?}", e);
        total_failure(BackendError::from(e))
    })?;

    Ok(Json(ReminderJobResponse {
        success: true,
        reminders_sent: summary.reminders_sent,
        timestamp: Utc::now(),
    }))
}

/// Response for the stats job
#[derive(Debug, Serialize)]
pub struct StatsJobResponse {
    pub success: bool,
    pub conversations_scanned: usize,
    pub ghosting_events: usize,
    pub trust_recalculated: usize,
    pub timestamp: DateTime<Utc>,
}

/// `POST /jobs/update-ghosting-stats`
///
/// Runs the detector, then recalculates trust signals for a bounded batch
/// of the most-recently-updated response patterns. The users the detector
/// just touched sort to the front of that batch, so their badges refresh in
/// the same run.
pub async fn run_update_ghosting_stats(
    State(db_pool): State<Option<PgPool>>,
) -> Result<Json<StatsJobResponse>, JobFailure> {
    let pool = db_pool
        .as_ref()
        .ok_or_else(|| total_failure(BackendError::job("database unavailable")))?;

    let detection = ghosting::detect_and_record_ghosting(pool).await.map_err(|e| {
        tracing::error!("Ghosting stats job failed before processing: {:?}", e);
        total_failure(BackendError::from(e))
    })?;

    let trust_recalculated = ghosting::recalculate_recent(pool, policy::TRUST_RECALC_BATCH)
        .await
        .unwrap_or_else(|e| {
            // detection already landed; report what we have
            tracing::warn!("Trust recalculation batch failed: {:?}", e);
            0
        });

    Ok(Json(StatsJobResponse {
        success: true,
        conversations_scanned: detection.conversations_scanned,
        ghosting_events: detection.ghosting_events,
        trust_recalculated,
        timestamp: Utc::now(),
    }))
}
