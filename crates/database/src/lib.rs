//! SQLite persistence layer for gr8life.
//!
//! This crate provides async database operations for users and journal
//! entries using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{entry, user, Database, NewUser};
//! use tracker_core::Dimension;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:gr8life.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Mirror a user from the identity provider
//!     let user = user::upsert_user(db.pool(), &NewUser {
//!         external_auth_id: "user_2abc".to_string(),
//!         email: "ada@example.com".to_string(),
//!         name: Some("Ada".to_string()),
//!         image_url: None,
//!     }).await?;
//!
//!     // Write a reflection
//!     entry::create_entry(db.pool(), user.id, Dimension::Health, "Morning run", 1_700_000_000_000).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod entry;
pub mod error;
pub mod models;
pub mod user;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{Entry, NewUser, User};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// let db = database::Database::connect("sqlite:data/gr8life.db?mode=rwc").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    ///
    /// Every connection to `sqlite::memory:` opens a separate database, so
    /// in-memory databases should use a pool size of 1.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Open a fresh, migrated in-memory database.
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect_with_pool_size("sqlite::memory:", 1).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::{aggregate, Dimension};

    const T: i64 = 1_700_000_000_000;

    fn new_user(external_auth_id: &str) -> NewUser {
        NewUser {
            external_auth_id: external_auth_id.to_string(),
            email: format!("{external_auth_id}@example.com"),
            name: Some("Test".to_string()),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_user_creates_then_updates() {
        let db = Database::in_memory().await.unwrap();

        let created = user::upsert_user(db.pool(), &new_user("ext-1")).await.unwrap();
        assert_eq!(created.email, "ext-1@example.com");

        let updated = user::upsert_user(
            db.pool(),
            &NewUser {
                email: "new@example.com".to_string(),
                name: None,
                image_url: Some("https://img.example.com/a.png".to_string()),
                ..new_user("ext-1")
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.name, None);
        assert_eq!(user::count_users(db.pool()).await.unwrap(), 1);

        let found = user::find_user_by_external_id(db.pool(), "ext-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, updated);
        assert_eq!(user::get_user(db.pool(), created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_find_missing_user_is_none() {
        let db = Database::in_memory().await.unwrap();
        let found = user::find_user_by_external_id(db.pool(), "nobody").await.unwrap();
        assert!(found.is_none());

        let result = user::get_user(db.pool(), 42).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_user_cascades_entries() {
        let db = Database::in_memory().await.unwrap();
        let alice = user::upsert_user(db.pool(), &new_user("alice")).await.unwrap();
        entry::create_entry(db.pool(), alice.id, Dimension::Ego, "Gratitude list", T)
            .await
            .unwrap();

        user::delete_user_by_external_id(db.pool(), "alice").await.unwrap();
        assert_eq!(entry::count_entries(db.pool()).await.unwrap(), 0);

        let again = user::delete_user_by_external_id(db.pool(), "alice").await;
        assert!(matches!(again, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_entries_by_dimension_newest_first_and_scoped() {
        let db = Database::in_memory().await.unwrap();
        let alice = user::upsert_user(db.pool(), &new_user("alice")).await.unwrap();
        let bob = user::upsert_user(db.pool(), &new_user("bob")).await.unwrap();

        for i in 0..3 {
            entry::create_entry(db.pool(), alice.id, Dimension::Learn, &format!("a{i}"), T + i)
                .await
                .unwrap();
        }
        entry::create_entry(db.pool(), alice.id, Dimension::Health, "run", T)
            .await
            .unwrap();
        entry::create_entry(db.pool(), bob.id, Dimension::Learn, "b0", T + 10)
            .await
            .unwrap();

        let entries = entry::entries_by_dimension(db.pool(), alice.id, Dimension::Learn, 100)
            .await
            .unwrap();
        let contents: Vec<_> = entries.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["a2", "a1", "a0"]);

        let limited = entry::entries_by_dimension(db.pool(), alice.id, Dimension::Learn, 2)
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].content, "a2");
    }

    #[tokio::test]
    async fn test_delete_entry_requires_owner() {
        let db = Database::in_memory().await.unwrap();
        let alice = user::upsert_user(db.pool(), &new_user("alice")).await.unwrap();
        let bob = user::upsert_user(db.pool(), &new_user("bob")).await.unwrap();

        let created = entry::create_entry(db.pool(), alice.id, Dimension::Family, "Dinner", T)
            .await
            .unwrap();

        let result = entry::delete_entry(db.pool(), created.id, bob.id).await;
        assert!(matches!(result, Err(DatabaseError::Unauthorized { .. })));
        assert_eq!(
            entry::get_entry(db.pool(), created.id).await.unwrap(),
            Some(created.clone())
        );

        entry::delete_entry(db.pool(), created.id, alice.id).await.unwrap();
        assert_eq!(entry::get_entry(db.pool(), created.id).await.unwrap(), None);

        let missing = entry::delete_entry(db.pool(), created.id, alice.id).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_entries_since_feeds_aggregate() {
        let db = Database::in_memory().await.unwrap();
        let alice = user::upsert_user(db.pool(), &new_user("alice")).await.unwrap();

        entry::create_entry(db.pool(), alice.id, Dimension::Health, "old", T - 1)
            .await
            .unwrap();
        entry::create_entry(db.pool(), alice.id, Dimension::Health, "h1", T)
            .await
            .unwrap();
        entry::create_entry(db.pool(), alice.id, Dimension::Health, "h2", T + 1)
            .await
            .unwrap();
        entry::create_entry(db.pool(), alice.id, Dimension::Learn, "l1", T + 2)
            .await
            .unwrap();

        let entries = entry::entries_since(db.pool(), alice.id, T).await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].dimension(), Some(Dimension::Health));

        let counts = aggregate(&entries, T);
        assert_eq!(counts.get(Dimension::Health), 2);
        assert_eq!(counts.get(Dimension::Learn), 1);
        assert_eq!(counts.total(), 3);
    }
}
