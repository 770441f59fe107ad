//! Nudge dispatcher jobs
//!
//! Both jobs walk the same candidate query and treat every per-candidate
//! failure as non-fatal: log, move on, report a partial count. A candidate
//! suppressed by a cooldown is a silent skip, not an error. The only hard
//! failure is not being able to fetch candidates at all.

use serde::Serialize;
use sqlx::PgPool;

use crate::shared::matching::{NotificationKind, NudgeCandidate};
use crate::shared::policy;

use super::db;

/// Outcome of a soft-nudge run
#[derive(Debug, Clone, Serialize)]
pub struct NudgeRunSummary {
    pub candidates: usize,
    pub nudges_sent: usize,
}

/// Outcome of an escalated-reminder run
#[derive(Debug, Clone, Serialize)]
pub struct ReminderRunSummary {
    pub candidates: usize,
    pub reminders_sent: usize,
}

/// Soft nudge: "don't leave them hanging".
///
/// Cooldown is pair-scoped through notification history, so someone who
/// matched the same counterpart twice is still only nudged about them once
/// per window.
pub async fn send_conversation_nudges(pool: &PgPool) -> Result<NudgeRunSummary, sqlx::Error> {
    let candidates = db::conversations_needing_nudge(pool).await?;

    let mut summary = NudgeRunSummary {
        candidates: candidates.len(),
        nudges_sent: 0,
    };

    for candidate in &candidates {
        match send_soft_nudge(pool, candidate).await {
            Ok(true) => summary.nudges_sent += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    conversation_id = %candidate.conversation_id,
                    "Failed to send nudge: {:?}",
                    e
                );
            }
        }
    }

    tracing::info!(
        candidates = summary.candidates,
        sent = summary.nudges_sent,
        "Conversation nudge run complete"
    );

    Ok(summary)
}

async fn send_soft_nudge(pool: &PgPool, candidate: &NudgeCandidate) -> Result<bool, sqlx::Error> {
    let suppressed =
        db::recent_nudge_exists(pool, candidate.user_to_nudge, candidate.other_user_id).await?;
    if suppressed {
        tracing::debug!(
            conversation_id = %candidate.conversation_id,
            "Nudge suppressed by pair cooldown"
        );
        return Ok(false);
    }

    let message = format!(
        "{} is waiting to hear from you. Reply, or close the conversation gracefully.",
        candidate.other_user_name
    );

    db::insert_notification(
        pool,
        candidate.user_to_nudge,
        NotificationKind::Nudge,
        "Don't leave them hanging",
        &message,
        candidate.other_user_id,
    )
    .await?;

    Ok(true)
}

/// Escalated reminder for conversations drifting toward the lapse cutoff.
///
/// The conversation's reminder stamp is taken before the notification is
/// written: if the insert then fails, the user misses one reminder rather
/// than ever receiving a duplicate.
pub async fn send_ghosting_reminders(pool: &PgPool) -> Result<ReminderRunSummary, sqlx::Error> {
    let candidates: Vec<NudgeCandidate> = db::conversations_needing_nudge(pool)
        .await?
        .into_iter()
        .filter(|c| policy::needs_escalated_reminder(c.days_inactive))
        .collect();

    let mut summary = ReminderRunSummary {
        candidates: candidates.len(),
        reminders_sent: 0,
    };

    for candidate in &candidates {
        match send_escalated_reminder(pool, candidate).await {
            Ok(true) => summary.reminders_sent += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    conversation_id = %candidate.conversation_id,
                    "Failed to send ghosting reminder: {:?}",
                    e
                );
            }
        }
    }

    tracing::info!(
        candidates = summary.candidates,
        sent = summary.reminders_sent,
        "Ghosting reminder run complete"
    );

    Ok(summary)
}

async fn send_escalated_reminder(
    pool: &PgPool,
    candidate: &NudgeCandidate,
) -> Result<bool, sqlx::Error> {
    let stamped = db::mark_reminder_sent(pool, candidate.conversation_id).await?;
    if !stamped {
        tracing::debug!(
            conversation_id = %candidate.conversation_id,
            "Reminder suppressed by conversation cooldown"
        );
        return Ok(false);
    }

    let message = format!(
        "Your conversation with {} has been quiet for {} days. Silence counts as ghosting soon; a short goodbye is kinder.",
        candidate.other_user_name, candidate.days_inactive
    );

    db::insert_notification(
        pool,
        candidate.user_to_nudge,
        NotificationKind::GhostingReminder,
        "Still there?",
        &message,
        candidate.other_user_id,
    )
    .await?;

    Ok(true)
}
