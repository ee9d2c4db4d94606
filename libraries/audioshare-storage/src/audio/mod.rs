//! Audio catalog queries

mod fold;

pub use fold::{fold_rows, AudioListRow};

use audioshare_core::{
    error::Result,
    types::{
        AudioId, AudioListPage, AudioListQuery, AudioRecord, BlobId, DownloadAudio, OrderType,
        SharedTo, UpdateAudio, UserId,
    },
    AudioShareError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Insert a freshly uploaded audio with blank metadata
pub async fn create(pool: &SqlitePool, user_id: UserId, blob_id: BlobId) -> Result<AudioId> {
    let row = sqlx::query(
        "INSERT INTO audios (user_id, title, duration, file_path)
         VALUES (?, '', 0, ?)
         RETURNING audio_id",
    )
    .bind(user_id.get())
    .bind(blob_id.to_string())
    .fetch_one(pool)
    .await?;

    Ok(AudioId::new(row.try_get("audio_id")?))
}

/// Update title and/or duration, scoped to the owner
///
/// Absent fields keep their stored value.
pub async fn update_description(
    pool: &SqlitePool,
    user_id: UserId,
    audio_id: AudioId,
    update: UpdateAudio,
) -> Result<()> {
    let result = sqlx::query(
        "UPDATE audios
         SET title = COALESCE(?, title), duration = COALESCE(?, duration)
         WHERE user_id = ? AND audio_id = ?",
    )
    .bind(update.title)
    .bind(update.duration)
    .bind(user_id.get())
    .bind(audio_id.get())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AudioShareError::NotOwner);
    }

    Ok(())
}

/// Title and blob of an audio visible to the user
pub async fn get_for_download(
    pool: &SqlitePool,
    user_id: UserId,
    audio_id: AudioId,
) -> Result<DownloadAudio> {
    let row = sqlx::query(
        "SELECT a.title, a.file_path
         FROM audios a
         WHERE a.audio_id = ?
           AND (a.user_id = ?
                OR EXISTS (SELECT 1 FROM shares s WHERE s.audio_id = a.audio_id AND s.user_id = ?))",
    )
    .bind(audio_id.get())
    .bind(user_id.get())
    .bind(user_id.get())
    .fetch_optional(pool)
    .await?
    .ok_or(AudioShareError::AudioNotFound)?;

    let file_path: String = row.try_get("file_path")?;
    let blob_id = file_path.parse::<BlobId>().map_err(|e| {
        AudioShareError::database(format!("corrupt blob reference {file_path:?}: {e}"))
    })?;

    Ok(DownloadAudio {
        title: row.try_get("title")?,
        blob_id,
    })
}

/// ORDER BY clauses for the paginated inner query and the joined outer query.
///
/// Both end with `audio_id` so that rows of one audio stay adjacent after the
/// share join and page boundaries are stable between requests.
fn order_clauses(order: OrderType) -> (&'static str, &'static str) {
    match order {
        OrderType::Owner => (
            "is_owner DESC, owner_name, title, audio_id",
            "o.is_owner DESC, o.owner_name, o.title, o.audio_id, shared_to_name, shared_to_id",
        ),
        OrderType::Alphabet => (
            "title, audio_id",
            "o.title, o.audio_id, shared_to_name, shared_to_id",
        ),
    }
}

/// Owned and shared audio of a user, one page, with share lists attached
pub async fn list(
    pool: &SqlitePool,
    user_id: UserId,
    query: AudioListQuery,
) -> Result<AudioListPage> {
    let (inner_order, outer_order) = order_clauses(query.order);

    let sql = format!(
        "SELECT o.full_count, o.audio_id, o.title, o.is_owner, o.owner_id, o.owner_name,
                r.user_id AS shared_to_id, u.name AS shared_to_name
         FROM (
             SELECT count(*) OVER () AS full_count,
                    a.audio_id AS audio_id,
                    a.title AS title,
                    CASE WHEN a.user_id = ? THEN 1 ELSE 0 END AS is_owner,
                    a.user_id AS owner_id,
                    ow.name AS owner_name
             FROM audios a
             JOIN users ow ON ow.user_id = a.user_id
             WHERE a.user_id = ?
                OR a.audio_id IN (SELECT audio_id FROM shares WHERE user_id = ?)
             ORDER BY {inner_order}
             LIMIT ? OFFSET ?
         ) o
         LEFT JOIN shares r ON r.audio_id = o.audio_id
         LEFT JOIN users u ON u.user_id = r.user_id
         ORDER BY {outer_order}"
    );

    let rows = sqlx::query(&sql)
        .bind(user_id.get())
        .bind(user_id.get())
        .bind(user_id.get())
        .bind(i64::from(query.limit))
        .bind(i64::from(query.offset))
        .fetch_all(pool)
        .await?;

    let rows = rows
        .iter()
        .map(list_row)
        .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;

    let mut page = fold_rows(rows);
    if page.records.is_empty() && query.offset > 0 {
        // No rows carry the window count past the end
        page.total_count = sqlx::query_scalar::<_, i64>(
            "SELECT count(*) FROM audios a
             WHERE a.user_id = ?
                OR a.audio_id IN (SELECT audio_id FROM shares WHERE user_id = ?)",
        )
        .bind(user_id.get())
        .bind(user_id.get())
        .fetch_one(pool)
        .await?;
    }

    tracing::debug!(
        user_id = %user_id,
        order = %query.order,
        total = page.total_count,
        returned = page.records.len(),
        "audio list"
    );

    Ok(page)
}

fn list_row(row: &SqliteRow) -> std::result::Result<AudioListRow, sqlx::Error> {
    let shared_to_id: Option<i64> = row.try_get("shared_to_id")?;
    let shared_to_name: Option<String> = row.try_get("shared_to_name")?;

    Ok(AudioListRow {
        total_count: row.try_get("full_count")?,
        record: AudioRecord {
            id: AudioId::new(row.try_get("audio_id")?),
            name: row.try_get("title")?,
            is_owner: row.try_get("is_owner")?,
            owner_id: UserId::new(row.try_get("owner_id")?),
            owner_name: row.try_get("owner_name")?,
            shared_to: None,
        },
        share: shared_to_id.map(|id| SharedTo {
            id: UserId::new(id),
            name: shared_to_name.unwrap_or_default(),
        }),
    })
}
