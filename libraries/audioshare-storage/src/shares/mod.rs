//! Share edges between audio and users

use crate::error::{violation, Violation};
use audioshare_core::{
    error::Result,
    types::{AudioId, Page, SharedCount, SharedCountsPage, UserId},
    AudioShareError,
};
use sqlx::{Row, SqlitePool};

/// Share an audio with `target`, only if `owner` owns it
///
/// The ownership check is the SELECT feeding the insert, so an audio owned by
/// someone else simply inserts nothing.
pub async fn create(
    pool: &SqlitePool,
    owner: UserId,
    audio_id: AudioId,
    target: UserId,
) -> Result<()> {
    let result = sqlx::query(
        "INSERT INTO shares (audio_id, user_id)
         SELECT audio_id, ? FROM audios WHERE audio_id = ? AND user_id = ?",
    )
    .bind(target.get())
    .bind(audio_id.get())
    .bind(owner.get())
    .execute(pool)
    .await;

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            return Err(match violation(&e) {
                Some(Violation::Unique) => AudioShareError::ShareExists,
                Some(Violation::ForeignKey) => AudioShareError::ShareTargetNotFound,
                None => e.into(),
            })
        }
    };

    if result.rows_affected() == 0 {
        return Err(AudioShareError::NotOwner);
    }

    tracing::debug!(%owner, %audio_id, %target, "audio shared");
    Ok(())
}

/// Remove `target`'s share of an audio, only if `owner` owns it
pub async fn delete(
    pool: &SqlitePool,
    owner: UserId,
    audio_id: AudioId,
    target: UserId,
) -> Result<()> {
    let result = sqlx::query(
        "DELETE FROM shares
         WHERE audio_id = (SELECT audio_id FROM audios WHERE audio_id = ? AND user_id = ?)
           AND user_id = ?",
    )
    .bind(audio_id.get())
    .bind(owner.get())
    .bind(target.get())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AudioShareError::NotOwner);
    }

    tracing::debug!(%owner, %audio_id, %target, "audio unshared");
    Ok(())
}

/// Count shared audio per target user across the whole system
pub async fn count_by_user(pool: &SqlitePool, page: Page) -> Result<SharedCountsPage> {
    let rows = sqlx::query(
        "SELECT count(*) OVER () AS full_count, u.user_id AS user_id, u.name AS name,
                count(*) AS shared_records
         FROM shares s
         JOIN users u ON u.user_id = s.user_id
         GROUP BY u.user_id, u.name
         ORDER BY u.name, u.user_id
         LIMIT ? OFFSET ?",
    )
    .bind(i64::from(page.limit))
    .bind(i64::from(page.offset))
    .fetch_all(pool)
    .await?;

    let mut counts = SharedCountsPage::default();
    for row in rows {
        counts.total_count = row.try_get("full_count")?;
        counts.users.push(SharedCount {
            id: UserId::new(row.try_get("user_id")?),
            name: row.try_get("name")?,
            shared_records: row.try_get("shared_records")?,
        });
    }

    if counts.users.is_empty() && page.offset > 0 {
        counts.total_count =
            sqlx::query_scalar::<_, i64>("SELECT count(DISTINCT user_id) FROM shares")
                .fetch_one(pool)
                .await?;
    }

    Ok(counts)
}
