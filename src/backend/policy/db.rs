//! Database operations for the conversation policy store
//!
//! This module contains the database operations behind the policy RPC
//! surface: active-conversation counting, admission and pause checks, and
//! the conversation write paths.
//!
//! A conversation is "active" for quota purposes while its stage is live
//! (`active` or `nudge_sent`) and it has seen activity within the recency
//! window; conversations that were never messaged count from their creation
//! time instead.

use chrono::{Duration, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::matching::{Conversation, ConversationStage, PauseCheck};
use crate::shared::policy;

/// Map a conversations row to the shared DTO
fn conversation_from_row(row: &sqlx::postgres::PgRow) -> Conversation {
    Conversation {
        id: row.get("id"),
        user_a: row.get("user_a"),
        user_b: row.get("user_b"),
        stage: ConversationStage::from_str(row.get::<String, _>("stage").as_str())
            .unwrap_or(ConversationStage::Active),
        created_at: row.get("created_at"),
        last_message_at: row.get("last_message_at"),
        last_sender_id: row.get("last_sender_id"),
        reminder_sent_at: row.get("reminder_sent_at"),
        ghosted_by: row.get("ghosted_by"),
    }
}

/// Count conversations currently held against a user's quota.
///
/// Pure read; returns 0 for users with no conversations and never counts
/// closed, archived, or ghosted ones.
pub async fn active_conversation_count(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let cutoff = Utc::now() - Duration::days(policy::ACTIVE_RECENCY_DAYS);

    let row = sqlx::query(
        r#"
        SELECT COUNT(*) as count
        FROM conversations
        WHERE (user_a = $1 OR user_b = $1)
          AND stage IN ('active', 'nudge_sent')
          AND COALESCE(last_message_at, created_at) >= $2
        "#,
    )
    .bind(user_id)
    .bind(cutoff)
    .fetch_one(pool)
    .await?;

    let count: i64 = row.get("count");
    Ok(count)
}

/// Whether the user is below the conversation cap.
pub async fn can_start_new_conversation(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let count = active_conversation_count(pool, user_id).await?;
    Ok(policy::can_start_new(count))
}

/// Pause eligibility: allowed only with zero active conversations.
pub async fn pause_check(pool: &PgPool, user_id: Uuid) -> Result<PauseCheck, sqlx::Error> {
    let count = active_conversation_count(pool, user_id).await?;
    Ok(PauseCheck {
        can_pause: policy::can_pause(count),
        active_conversation_count: count,
    })
}

/// Create a conversation between two matched users.
///
/// The admission check happens in the handler before this insert; the check
/// and the insert are two separate statements, not one transaction. Two
/// near-simultaneous starts by the same user can therefore both pass the
/// check and briefly push the count past the cap. That is an accepted
/// property of the soft limit, not an invariant violation.
pub async fn create_conversation(
    pool: &PgPool,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<Uuid, sqlx::Error> {
    let conversation_id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO conversations (id, user_a, user_b, stage, created_at)
        VALUES ($1, $2, $3, 'active', $4)
        "#,
    )
    .bind(conversation_id)
    .bind(user_a)
    .bind(user_b)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(conversation_id)
}

/// Get a conversation by ID
pub async fn get_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
) -> Result<Option<Conversation>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_a, user_b, stage, created_at, last_message_at,
               last_sender_id, reminder_sent_at, ghosted_by
        FROM conversations
        WHERE id = $1
        "#,
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| conversation_from_row(&r)))
}

/// Store a message and refresh the conversation's recency fields.
///
/// A reply into a nudged conversation revives it: `nudge_sent` drops back
/// to `active` so the reminder machinery starts over.
pub async fn record_message(
    pool: &PgPool,
    conversation_id: Uuid,
    sender_id: Uuid,
    content: &str,
) -> Result<Uuid, sqlx::Error> {
    let message_id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO messages (id, conversation_id, sender_id, content, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(message_id)
    .bind(conversation_id)
    .bind(sender_id)
    .bind(content)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        UPDATE conversations
        SET last_message_at = $1,
            last_sender_id = $2,
            stage = CASE WHEN stage = 'nudge_sent' THEN 'active' ELSE stage END
        WHERE id = $3
        "#,
    )
    .bind(now)
    .bind(sender_id)
    .bind(conversation_id)
    .execute(pool)
    .await?;

    Ok(message_id)
}

/// Close a conversation gracefully, crediting the closer's response pattern.
///
/// The stage update and the pattern credit run in one transaction: a
/// conversation is never marked closed without the matching
/// `graceful_closures` increment. The stage guard makes a repeated close a
/// no-op. Returns whether this call performed the close.
pub async fn close_conversation_gracefully(
    pool: &PgPool,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE conversations
        SET stage = 'closed_gracefully'
        WHERE id = $1
          AND (user_a = $2 OR user_b = $2)
          AND stage IN ('active', 'nudge_sent')
        "#,
    )
    .bind(conversation_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    let row = sqlx::query(
        r#"
        INSERT INTO user_response_patterns
            (user_id, ghosted_count, graceful_closures, visibility_score, last_calculated_at)
        VALUES ($1, 0, 1, 1.0, $2)
        ON CONFLICT (user_id) DO UPDATE
        SET graceful_closures = user_response_patterns.graceful_closures + 1
        RETURNING ghosted_count, graceful_closures
        "#,
    )
    .bind(user_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let ghosted: i64 = row.get::<i32, _>("ghosted_count") as i64;
    let graceful: i64 = row.get::<i32, _>("graceful_closures") as i64;
    let score = policy::visibility_score(ghosted, graceful);

    sqlx::query(
        r#"
        UPDATE user_response_patterns
        SET visibility_score = $1, last_calculated_at = $2
        WHERE user_id = $3
        "#,
    )
    .bind(score)
    .bind(now)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(true)
}

/// Archive a live conversation. Returns whether this call archived it.
pub async fn archive_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE conversations
        SET stage = 'archived'
        WHERE id = $1
          AND (user_a = $2 OR user_b = $2)
          AND stage IN ('active', 'nudge_sent')
        "#,
    )
    .bind(conversation_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Enter pause mode. Re-validates the zero-active-conversations rule inside
/// the update itself so a stale client check cannot slip a pause through.
/// Returns whether the pause took effect.
pub async fn pause_dating(
    pool: &PgPool,
    user_id: Uuid,
    reason: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let check = pause_check(pool, user_id).await?;
    if !check.can_pause {
        return Ok(false);
    }

    let now = Utc::now();
    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET is_paused = true, pause_reason = $1, paused_at = $2
        WHERE id = $3
        "#,
    )
    .bind(reason)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Leave pause mode.
pub async fn resume_dating(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET is_paused = false, pause_reason = NULL, paused_at = NULL
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
