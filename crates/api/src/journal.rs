//! Journal operations on behalf of an identified caller.
//!
//! Reads degrade to empty or `None` results when the caller is
//! unauthenticated or has no user record; writes fail instead.

use chrono::Utc;
use database::validation::validate_content;
use database::{entry, user, Database, Entry, User};
use serde::Serialize;
use tracing::{debug, info};
use tracker_core::{
    aggregate, balance_score, completion_percent, completion_score, CompletionCounts,
    CompletionFlags, Dimension,
};

use crate::error::{ApiError, Result};

/// Maximum entries returned by [`Journal::entries_by_dimension`].
pub const ENTRIES_PAGE_SIZE: i64 = 100;

/// Counts, both displayed metrics, and most/least active dimensions for a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionSummary {
    pub window_start: i64,
    pub counts: CompletionCounts,
    pub completed: CompletionFlags,
    /// Dimensions with at least one entry, out of 8.
    pub score: u8,
    pub percent: u8,
    /// Coefficient-of-variation balance, 0 to 100.
    pub balance: f64,
    pub most_active: Option<Dimension>,
    pub least_active: Dimension,
}

impl CompletionSummary {
    fn new(window_start: i64, counts: CompletionCounts) -> Self {
        Self {
            window_start,
            completed: counts.to_flags(),
            score: completion_score(&counts),
            percent: completion_percent(&counts),
            balance: balance_score(&counts),
            most_active: counts.most_active(),
            least_active: counts.least_active(),
            counts,
        }
    }
}

/// Journal service over the database.
#[derive(Debug, Clone)]
pub struct Journal {
    db: Database,
}

impl Journal {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// User record for `subject`, if the caller is identified and known.
    pub async fn current_user(&self, subject: Option<&str>) -> Result<Option<User>> {
        let Some(subject) = subject else {
            return Ok(None);
        };
        let user = user::find_user_by_external_id(self.db.pool(), subject).await?;
        if user.is_none() {
            debug!(subject, "No user record for identity");
        }
        Ok(user)
    }

    async fn require_user(&self, subject: Option<&str>) -> Result<User> {
        let subject = subject.ok_or(ApiError::Unauthenticated)?;
        user::find_user_by_external_id(self.db.pool(), subject)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", subject)))
    }

    /// Up to 100 of the caller's entries in `dimension`, newest first.
    pub async fn entries_by_dimension(
        &self,
        subject: Option<&str>,
        dimension: Dimension,
    ) -> Result<Vec<Entry>> {
        let Some(user) = self.current_user(subject).await? else {
            return Ok(Vec::new());
        };
        let entries =
            entry::entries_by_dimension(self.db.pool(), user.id, dimension, ENTRIES_PAGE_SIZE)
                .await?;
        Ok(entries)
    }

    /// Which dimensions have at least one entry since `start`.
    pub async fn weekly_completion(
        &self,
        subject: Option<&str>,
        start: i64,
    ) -> Result<Option<CompletionFlags>> {
        Ok(self.counts(subject, start).await?.map(|counts| counts.to_flags()))
    }

    /// Per-dimension counts since `start`; `0` covers all time.
    pub async fn entry_completion(
        &self,
        subject: Option<&str>,
        start: i64,
    ) -> Result<CompletionCounts> {
        Ok(self.counts(subject, start).await?.unwrap_or_default())
    }

    pub async fn completion_summary(
        &self,
        subject: Option<&str>,
        start: i64,
    ) -> Result<Option<CompletionSummary>> {
        Ok(self
            .counts(subject, start)
            .await?
            .map(|counts| CompletionSummary::new(start, counts)))
    }

    async fn counts(&self, subject: Option<&str>, start: i64) -> Result<Option<CompletionCounts>> {
        let Some(user) = self.current_user(subject).await? else {
            return Ok(None);
        };
        let entries = entry::entries_since(self.db.pool(), user.id, start).await?;
        Ok(Some(aggregate(&entries, start)))
    }

    /// An entry, if it exists and belongs to the caller.
    pub async fn get_entry(&self, subject: Option<&str>, id: i64) -> Result<Option<Entry>> {
        let Some(user) = self.current_user(subject).await? else {
            return Ok(None);
        };
        let entry = entry::get_entry(self.db.pool(), id).await?;
        Ok(entry.filter(|e| e.is_owned_by(user.id)))
    }

    /// Record a reflection now. Returns its creation time in epoch millis.
    pub async fn create_entry(
        &self,
        subject: Option<&str>,
        dimension: &str,
        content: &str,
    ) -> Result<i64> {
        self.create_entry_at(subject, dimension, content, Utc::now().timestamp_millis())
            .await
    }

    pub async fn create_entry_at(
        &self,
        subject: Option<&str>,
        dimension: &str,
        content: &str,
        created_at: i64,
    ) -> Result<i64> {
        let user = self.require_user(subject).await?;
        let dimension: Dimension = dimension.parse()?;
        validate_content(content)?;

        let entry =
            entry::create_entry(self.db.pool(), user.id, dimension, content, created_at).await?;
        info!(entry_id = entry.id, user_id = user.id, %dimension, "Entry created");
        Ok(entry.created_at)
    }

    /// Delete one of the caller's entries.
    pub async fn delete_entry(&self, subject: Option<&str>, id: i64) -> Result<()> {
        let user = self.require_user(subject).await?;
        entry::delete_entry(self.db.pool(), id, user.id).await?;
        info!(entry_id = id, user_id = user.id, "Entry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::NewUser;

    const T: i64 = 1_760_000_000_000;

    async fn setup() -> Journal {
        let db = Database::in_memory().await.unwrap();
        for (subject, email) in [("user_a", "a@example.com"), ("user_b", "b@example.com")] {
            user::upsert_user(
                db.pool(),
                &NewUser {
                    external_auth_id: subject.to_string(),
                    email: email.to_string(),
                    name: None,
                    image_url: None,
                },
            )
            .await
            .unwrap();
        }
        Journal::new(db)
    }

    #[tokio::test]
    async fn test_weekly_scenario() {
        let journal = setup().await;
        let me = Some("user_a");
        journal.create_entry_at(me, "health", "run", T).await.unwrap();
        journal.create_entry_at(me, "health", "swim", T + 1).await.unwrap();
        journal.create_entry_at(me, "learn", "book", T + 2).await.unwrap();
        journal.create_entry_at(me, "ego", "old", T - 1).await.unwrap();

        let counts = journal.entry_completion(me, T).await.unwrap();
        assert_eq!(counts.get(Dimension::Health), 2);
        assert_eq!(counts.get(Dimension::Learn), 1);
        assert_eq!(counts.get(Dimension::Ego), 0);
        assert_eq!(counts.total(), 3);

        let flags = journal.weekly_completion(me, T).await.unwrap().unwrap();
        assert!(flags.is_complete(Dimension::Health));
        assert!(flags.is_complete(Dimension::Learn));
        assert_eq!(flags.completed_count(), 2);

        let summary = journal.completion_summary(me, T).await.unwrap().unwrap();
        assert_eq!(summary.score, 2);
        assert_eq!(summary.percent, 25);
        assert_eq!(summary.most_active, Some(Dimension::Health));
        assert_eq!(summary.least_active, Dimension::Transact);

        // All time includes the older entry.
        assert_eq!(journal.entry_completion(me, 0).await.unwrap().total(), 4);
    }

    #[tokio::test]
    async fn test_reads_degrade_when_unauthenticated() {
        let journal = setup().await;
        journal
            .create_entry_at(Some("user_a"), "family", "dinner", T)
            .await
            .unwrap();

        assert!(journal.weekly_completion(None, 0).await.unwrap().is_none());
        assert!(journal
            .weekly_completion(Some("user_unknown"), 0)
            .await
            .unwrap()
            .is_none());
        assert_eq!(journal.entry_completion(None, 0).await.unwrap().total(), 0);
        assert!(journal
            .entries_by_dimension(None, Dimension::Family)
            .await
            .unwrap()
            .is_empty());
        assert!(journal.completion_summary(None, 0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_entry_failures() {
        let journal = setup().await;

        assert!(matches!(
            journal.create_entry(None, "health", "run").await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            journal.create_entry(Some("user_missing"), "health", "run").await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            journal.create_entry(Some("user_a"), "wealth", "run").await,
            Err(ApiError::UnknownDimension(_))
        ));
        assert!(matches!(
            journal.create_entry(Some("user_a"), "health", "   ").await,
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_entry_accepts_loose_dimension_case() {
        let journal = setup().await;
        let created_at = journal
            .create_entry(Some("user_a"), " Health ", "stretching")
            .await
            .unwrap();
        assert!(created_at > 0);

        let entries = journal
            .entries_by_dimension(Some("user_a"), Dimension::Health)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dimension, "health");
        assert_eq!(entries[0].created_at, created_at);
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_unauthorized_and_keeps_entry() {
        let journal = setup().await;
        journal
            .create_entry_at(Some("user_a"), "assist", "mentoring", T)
            .await
            .unwrap();
        let id = journal
            .entries_by_dimension(Some("user_a"), Dimension::Assist)
            .await
            .unwrap()[0]
            .id;

        assert!(matches!(
            journal.delete_entry(Some("user_b"), id).await,
            Err(ApiError::Unauthorized(_))
        ));
        assert!(journal.get_entry(Some("user_a"), id).await.unwrap().is_some());

        // Other users cannot read it either.
        assert!(journal.get_entry(Some("user_b"), id).await.unwrap().is_none());

        journal.delete_entry(Some("user_a"), id).await.unwrap();
        assert!(journal.get_entry(Some("user_a"), id).await.unwrap().is_none());
        assert!(matches!(
            journal.delete_entry(Some("user_a"), id).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_entries_by_dimension_is_scoped_to_caller() {
        let journal = setup().await;
        journal
            .create_entry_at(Some("user_a"), "invest", "index fund", T)
            .await
            .unwrap();
        journal
            .create_entry_at(Some("user_b"), "invest", "course", T + 1)
            .await
            .unwrap();

        let mine = journal
            .entries_by_dimension(Some("user_a"), Dimension::Invest)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].content, "index fund");
    }
}
