//! Database operations for nudge dispatching

use chrono::{DateTime, Duration, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::matching::{NotificationKind, NudgeCandidate};
use crate::shared::policy;

/// Conversations sitting in the nudge window: silent long enough to remind,
/// not yet lapsed. The user to nudge is the participant who did not send
/// the last message.
pub async fn conversations_needing_nudge(
    pool: &PgPool,
) -> Result<Vec<NudgeCandidate>, sqlx::Error> {
    let now = Utc::now();
    let nudge_cutoff = now - Duration::days(policy::NUDGE_AFTER_DAYS);
    let ghost_cutoff = now - Duration::days(policy::GHOST_AFTER_DAYS);

    let rows = sqlx::query(
        r#"
        SELECT c.id as conversation_id,
               CASE WHEN c.last_sender_id = c.user_a THEN c.user_b ELSE c.user_a END
                   as user_to_nudge,
               c.last_sender_id as other_user_id,
               p.username as other_user_name,
               c.last_message_at
        FROM conversations c
        INNER JOIN profiles p ON p.id = c.last_sender_id
        WHERE c.stage IN ('active', 'nudge_sent')
          AND c.last_sender_id IS NOT NULL
          AND c.last_message_at <= $1
          AND c.last_message_at > $2
        ORDER BY c.last_message_at ASC
        "#,
    )
    .bind(nudge_cutoff)
    .bind(ghost_cutoff)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let last_message_at: DateTime<Utc> = row.get("last_message_at");
            NudgeCandidate {
                conversation_id: row.get("conversation_id"),
                user_to_nudge: row.get("user_to_nudge"),
                other_user_id: row.get("other_user_id"),
                other_user_name: row.get("other_user_name"),
                last_message_at,
                days_inactive: policy::days_inactive(last_message_at, now),
            }
        })
        .collect())
}

/// Whether a nudge notification for this (user, counterpart) pair exists
/// within the cooldown window.
pub async fn recent_nudge_exists(
    pool: &PgPool,
    user_id: Uuid,
    related_user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let since = Utc::now() - Duration::days(policy::NUDGE_COOLDOWN_DAYS);

    let row = sqlx::query(
        r#"
        SELECT COUNT(*) as count
        FROM notifications
        WHERE user_id = $1
          AND related_user_id = $2
          AND type = 'nudge'
          AND created_at > $3
        "#,
    )
    .bind(user_id)
    .bind(related_user_id)
    .bind(since)
    .fetch_one(pool)
    .await?;

    let count: i64 = row.get("count");
    Ok(count > 0)
}

/// Insert a policy notification
pub async fn insert_notification(
    pool: &PgPool,
    user_id: Uuid,
    kind: NotificationKind,
    title: &str,
    message: &str,
    related_user_id: Uuid,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO notifications (id, user_id, type, title, message, related_user_id, read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, false, $7)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(kind.as_str())
    .bind(title)
    .bind(message)
    .bind(related_user_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Stamp a conversation's escalated-reminder timestamp, moving it into the
/// nudged stage.
///
/// The cooldown check is folded into the guard, so two overlapping job runs
/// cannot both stamp the same conversation: the loser matches zero rows.
/// Returns whether this call won the stamp.
pub async fn mark_reminder_sent(
    pool: &PgPool,
    conversation_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let now = Utc::now();
    let cooldown_floor = now - Duration::hours(policy::REMINDER_COOLDOWN_HOURS);

    let result = sqlx::query(
        r#"
        UPDATE conversations
        SET reminder_sent_at = $1,
            stage = CASE WHEN stage = 'active' THEN 'nudge_sent' ELSE stage END
        WHERE id = $2
          AND stage IN ('active', 'nudge_sent')
          AND (reminder_sent_at IS NULL OR reminder_sent_at <= $3)
        "#,
    )
    .bind(now)
    .bind(conversation_id)
    .bind(cooldown_floor)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
