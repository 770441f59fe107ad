//! Ghosting detector
//!
//! Finds conversations where the last message has gone unanswered past the
//! lapse threshold and materializes each one as a ghosting event against the
//! silent party's response pattern.
//!
//! Idempotence: attribution happens inside a per-conversation transaction
//! whose first statement is a stage-guarded update. Once a conversation has
//! been moved to `ghosted`, the guard matches zero rows and every later run
//! (or a concurrently racing one) skips it, so the same lapse is never
//! double-counted and a conversation is never marked without the matching
//! pattern update.

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::policy;

/// Outcome of one detector run
#[derive(Debug, Clone, Serialize)]
pub struct GhostingRunSummary {
    /// Lapsed conversations considered this run
    pub conversations_scanned: usize,
    /// Ghosting events actually recorded (skips racing/duplicate work)
    pub ghosting_events: usize,
    /// Users whose response pattern changed, for trust recalculation
    #[serde(skip)]
    pub affected_users: Vec<Uuid>,
}

/// One lapsed conversation and its silent party
struct LapsedConversation {
    conversation_id: Uuid,
    silent_user_id: Uuid,
}

/// Scan for lapsed conversations and record ghosting events.
///
/// A failure on one conversation rolls back that conversation only; the
/// batch carries on. Only a failure to fetch the candidate list at all is
/// returned as an error.
pub async fn detect_and_record_ghosting(
    pool: &PgPool,
) -> Result<GhostingRunSummary, sqlx::Error> {
    let cutoff = Utc::now() - Duration::days(policy::GHOST_AFTER_DAYS);

    let rows = sqlx::query(
        r#"
        SELECT id, user_a, user_b, last_sender_id
        FROM conversations
        WHERE stage IN ('active', 'nudge_sent')
          AND last_sender_id IS NOT NULL
          AND last_message_at <= $1
        ORDER BY last_message_at ASC
        "#,
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    let candidates: Vec<LapsedConversation> = rows
        .iter()
        .filter_map(|row| {
            let user_a: Uuid = row.get("user_a");
            let user_b: Uuid = row.get("user_b");
            let last_sender: Uuid = row.get("last_sender_id");
            let silent = if last_sender == user_a {
                user_b
            } else if last_sender == user_b {
                user_a
            } else {
                // last sender is not a participant; bad data, skip
                return None;
            };
            Some(LapsedConversation {
                conversation_id: row.get("id"),
                silent_user_id: silent,
            })
        })
        .collect();

    let mut summary = GhostingRunSummary {
        conversations_scanned: candidates.len(),
        ghosting_events: 0,
        affected_users: Vec::new(),
    };

    for candidate in candidates {
        match attribute_ghosting(pool, &candidate).await {
            Ok(true) => {
                summary.ghosting_events += 1;
                if !summary.affected_users.contains(&candidate.silent_user_id) {
                    summary.affected_users.push(candidate.silent_user_id);
                }
            }
            Ok(false) => {
                tracing::debug!(
                    conversation_id = %candidate.conversation_id,
                    "Conversation already attributed, skipping"
                );
            }
            Err(e) => {
                tracing::warn!(
                    conversation_id = %candidate.conversation_id,
                    "Failed to record ghosting event: {:?}",
                    e
                );
            }
        }
    }

    tracing::info!(
        scanned = summary.conversations_scanned,
        recorded = summary.ghosting_events,
        "Ghosting detection run complete"
    );

    Ok(summary)
}

/// Attribute one lapse inside a single transaction.
///
/// Returns `Ok(false)` when the stage guard matched nothing, meaning the
/// conversation was already attributed by an earlier or concurrent run.
async fn attribute_ghosting(
    pool: &PgPool,
    candidate: &LapsedConversation,
) -> Result<bool, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE conversations
        SET stage = 'ghosted', ghosted_by = $1
        WHERE id = $2 AND stage IN ('active', 'nudge_sent')
        "#,
    )
    .bind(candidate.silent_user_id)
    .bind(candidate.conversation_id)
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
        VALUES ($1, 1, 0, 1.0, $2)
        ON CONFLICT (user_id) DO UPDATE
        SET ghosted_count = user_response_patterns.ghosted_count + 1
        RETURNING ghosted_count, graceful_closures
        "#,
    )
    .bind(candidate.silent_user_id)
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
    .bind(candidate.silent_user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(true)
}
