//! The local notification facility seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Outcome of asking the platform for permission to post notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// How often a registered trigger repeats after its first firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatFrequency {
    Daily,
    Weekly,
}

/// A notification channel (required on some platforms before posting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub high_importance: bool,
}

/// A request to register a timestamp trigger.
///
/// Registering a request whose `id` is already registered replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRequest {
    /// Stable trigger identifier.
    pub id: String,
    pub channel_id: String,
    pub title: String,
    pub body: String,
    /// First firing time in epoch milliseconds.
    pub timestamp_millis: i64,
    pub repeat: RepeatFrequency,
}

/// A platform facility that can post scheduled local notifications.
///
/// Implementations must treat `schedule` as an upsert keyed by
/// [`TriggerRequest::id`] and `cancel` of an unknown id as a no-op.
#[async_trait]
pub trait NotificationCenter: Send + Sync {
    /// Ask for permission to post notifications.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Create the channel if it does not exist.
    async fn ensure_channel(&self, channel: &Channel) -> Result<()>;

    /// Register or replace a trigger.
    async fn schedule(&self, request: TriggerRequest) -> Result<()>;

    /// Cancel a trigger by ID.
    async fn cancel(&self, id: &str) -> Result<()>;

    /// All currently registered triggers, ordered by ID.
    async fn pending(&self) -> Result<Vec<TriggerRequest>>;
}
