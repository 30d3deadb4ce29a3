//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::{Dimension, Tallied};

/// A user, mirrored from the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Subject identifier assigned by the identity provider.
    pub external_auth_id: String,
    /// Primary verified email.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Avatar URL.
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// Fields supplied by the identity provider when creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub external_auth_id: String,
    pub email: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

/// A single reflection tagged to a dimension.
///
/// Entries are immutable once written; they can only be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Dimension key as stored.
    pub dimension: String,
    /// Reflection text.
    pub content: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl Entry {
    /// Parsed dimension, or `None` if the stored key is not recognized.
    pub fn dimension(&self) -> Option<Dimension> {
        Dimension::from_key(&self.dimension)
    }

    /// Whether this entry belongs to `user_id`.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

impl Tallied for Entry {
    fn dimension_key(&self) -> &str {
        &self.dimension
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }
}
