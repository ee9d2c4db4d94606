//! Refresh token persistence, one row per user

use audioshare_core::{error::Result, types::UserId, AudioShareError};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

/// Store a refresh token for the user, replacing the previous one
pub async fn upsert(
    pool: &SqlitePool,
    user_id: UserId,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO refresh_tokens (user_id, refresh_token, expires_at)
         VALUES (?, ?, ?)
         ON CONFLICT(user_id)
         DO UPDATE SET refresh_token = excluded.refresh_token, expires_at = excluded.expires_at",
    )
    .bind(user_id.get())
    .bind(token)
    .bind(expires_at.timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

/// Replace a live token in one statement and return the owning user
///
/// The old token stops matching the moment the update commits, so a token
/// can be rotated at most once.
pub async fn rotate(
    pool: &SqlitePool,
    old_token: &str,
    new_token: &str,
    expires_at: DateTime<Utc>,
) -> Result<UserId> {
    let row = sqlx::query(
        "UPDATE refresh_tokens
         SET refresh_token = ?, expires_at = ?
         WHERE refresh_token = ? AND expires_at > ?
         RETURNING user_id",
    )
    .bind(new_token)
    .bind(expires_at.timestamp())
    .bind(old_token)
    .bind(Utc::now().timestamp())
    .fetch_optional(pool)
    .await?
    .ok_or(AudioShareError::InvalidRefreshToken)?;

    Ok(UserId::new(row.try_get("user_id")?))
}
