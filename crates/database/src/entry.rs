//! Journal entry operations.

use sqlx::SqlitePool;
use tracing::debug;
use tracker_core::Dimension;

use crate::error::{DatabaseError, Result};
use crate::models::Entry;

/// Insert a new entry for `user_id`.
pub async fn create_entry(
    pool: &SqlitePool,
    user_id: i64,
    dimension: Dimension,
    content: &str,
    created_at: i64,
) -> Result<Entry> {
    let entry = sqlx::query_as::<_, Entry>(
        r#"
        INSERT INTO entries (user_id, dimension, content, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, user_id, dimension, content, created_at
        "#,
    )
    .bind(user_id)
    .bind(dimension.key())
    .bind(content)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    debug!(entry_id = entry.id, user_id, %dimension, "Created entry");
    Ok(entry)
}

/// Get an entry by ID.
pub async fn get_entry(pool: &SqlitePool, id: i64) -> Result<Option<Entry>> {
    let entry = sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, user_id, dimension, content, created_at
        FROM entries
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// Delete an entry owned by `owner_id`.
///
/// Fails with `NotFound` if the entry does not exist and `Unauthorized`
/// if it belongs to another user; in both cases nothing is deleted.
pub async fn delete_entry(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<()> {
    let entry = get_entry(pool, id).await?.ok_or_else(|| DatabaseError::NotFound {
        entity: "Entry",
        id: id.to_string(),
    })?;

    if !entry.is_owned_by(owner_id) {
        return Err(DatabaseError::Unauthorized {
            entity: "Entry",
            id: id.to_string(),
        });
    }

    let result = sqlx::query(
        r#"
        DELETE FROM entries
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    // Lost a race with another delete.
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Entry",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Most recent entries for a user in one dimension, newest first.
pub async fn entries_by_dimension(
    pool: &SqlitePool,
    user_id: i64,
    dimension: Dimension,
    limit: i64,
) -> Result<Vec<Entry>> {
    let entries = sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, user_id, dimension, content, created_at
        FROM entries
        WHERE user_id = ? AND dimension = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(dimension.key())
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// All entries for a user created at or after `start` (epoch millis), oldest first.
pub async fn entries_since(pool: &SqlitePool, user_id: i64, start: i64) -> Result<Vec<Entry>> {
    let entries = sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, user_id, dimension, content, created_at
        FROM entries
        WHERE user_id = ? AND created_at >= ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Count total entries.
pub async fn count_entries(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM entries
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
