//! User operations.
//!
//! Users are never created by the app itself; they are mirrored from the
//! identity provider's webhook via [`upsert_user`].

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewUser, User};

/// Create a user, or update email/name/avatar if the external ID is already known.
pub async fn upsert_user(pool: &SqlitePool, user: &NewUser) -> Result<User> {
    let record = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (external_auth_id, email, name, image_url)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(external_auth_id) DO UPDATE SET
            email = excluded.email,
            name = excluded.name,
            image_url = excluded.image_url
        RETURNING id, external_auth_id, email, name, image_url, created_at
        "#,
    )
    .bind(&user.external_auth_id)
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.image_url)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, external_auth_id, email, name, image_url, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Find a user by identity-provider subject.
pub async fn find_user_by_external_id(
    pool: &SqlitePool,
    external_auth_id: &str,
) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, external_auth_id, email, name, image_url, created_at
        FROM users
        WHERE external_auth_id = ?
        "#,
    )
    .bind(external_auth_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Delete a user by identity-provider subject. Their entries are removed with them.
pub async fn delete_user_by_external_id(pool: &SqlitePool, external_auth_id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE external_auth_id = ?
        "#,
    )
    .bind(external_auth_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: external_auth_id.to_string(),
        });
    }

    Ok(())
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
