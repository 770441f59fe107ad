//! Trust-signal recalculation
//!
//! Rederives the per-user trust badges from the stored response pattern and
//! profile facts. Derivation itself is a pure function in the shared module;
//! this file is the read-derive-upsert plumbing around it.

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::matching::{ResponsePattern, TrustSignals};
use crate::shared::policy;

/// Load a user's response pattern, defaulting to a clean one.
async fn load_pattern(pool: &PgPool, user_id: Uuid) -> Result<ResponsePattern, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT user_id, ghosted_count, graceful_closures, visibility_score, last_calculated_at
        FROM user_response_patterns
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(match row {
        Some(r) => ResponsePattern {
            user_id: r.get("user_id"),
            ghosted_count: r.get::<i32, _>("ghosted_count") as i64,
            graceful_closures: r.get::<i32, _>("graceful_closures") as i64,
            visibility_score: r.get("visibility_score"),
            last_calculated_at: r.get("last_calculated_at"),
        },
        None => ResponsePattern::fresh(user_id),
    })
}

/// Recompute and persist one user's trust signals.
///
/// Idempotent: rerunning against unchanged inputs writes the same flags.
/// Returns `RowNotFound` when the user has no profile.
pub async fn calculate_trust_signals(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<TrustSignals, sqlx::Error> {
    let profile = sqlx::query(
        r#"
        SELECT identity_verified, created_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(sqlx::Error::RowNotFound)?;

    let identity_verified: bool = profile.get("identity_verified");
    let created_at: chrono::DateTime<Utc> = profile.get("created_at");

    let now = Utc::now();
    let account_age_days = (now - created_at).num_days().max(0);

    let pattern = load_pattern(pool, user_id).await?;

    let mut signals = TrustSignals::derive(&pattern, identity_verified, account_age_days);
    signals.calculated_at = Some(now);

    sqlx::query(
        r#"
        INSERT INTO user_trust_signals
            (user_id, shows_up_consistently, communicates_with_care, community_trusted,
             verified_identity, thoughtful_closer, calculated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id) DO UPDATE
        SET shows_up_consistently = EXCLUDED.shows_up_consistently,
            communicates_with_care = EXCLUDED.communicates_with_care,
            community_trusted = EXCLUDED.community_trusted,
            verified_identity = EXCLUDED.verified_identity,
            thoughtful_closer = EXCLUDED.thoughtful_closer,
            calculated_at = EXCLUDED.calculated_at
        "#,
    )
    .bind(user_id)
    .bind(signals.shows_up_consistently)
    .bind(signals.communicates_with_care)
    .bind(signals.community_trusted)
    .bind(signals.verified_identity)
    .bind(signals.thoughtful_closer)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(signals)
}

/// Recalculate trust signals for the most-recently-updated response
/// patterns, keeping badge staleness bounded without sweeping the whole
/// user base every run.
///
/// Returns how many users were recalculated; per-user failures are logged
/// and skipped.
pub async fn recalculate_recent(pool: &PgPool, limit: i64) -> Result<usize, sqlx::Error> {
    let limit = if limit > 0 { limit } else { policy::TRUST_RECALC_BATCH };

    let rows = sqlx::query(
        r#"
        SELECT user_id
        FROM user_response_patterns
        ORDER BY last_calculated_at DESC NULLS LAST
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut recalculated = 0;
    for row in rows {
        let user_id: Uuid = row.get("user_id");
        match calculate_trust_signals(pool, user_id).await {
            Ok(_) => recalculated += 1,
            Err(sqlx::Error::RowNotFound) => {
                tracing::debug!(user_id = %user_id, "No profile for pattern, skipping");
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, "Trust recalculation failed: {:?}", e);
            }
        }
    }

    Ok(recalculated)
}
