//! In-memory notification center.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::center::{Channel, NotificationCenter, PermissionStatus, TriggerRequest};
use crate::error::{ReminderError, Result};

#[derive(Default)]
struct Inner {
    channels: Vec<Channel>,
    triggers: BTreeMap<String, TriggerRequest>,
    cancelled: Vec<String>,
}

/// A [`NotificationCenter`] that keeps triggers in memory.
///
/// Useful for dry runs and tests. Permission and per-ID failures can be
/// configured to exercise the scheduler's error paths.
pub struct InMemoryNotificationCenter {
    permission: PermissionStatus,
    failing_ids: HashSet<String>,
    inner: RwLock<Inner>,
}

impl Default for InMemoryNotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryNotificationCenter {
    /// Create a center that grants permission.
    pub fn new() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            failing_ids: HashSet::new(),
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Create a center that denies permission.
    pub fn denying() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            ..Self::new()
        }
    }

    /// Make `schedule` fail for the given trigger ID.
    pub fn fail_on(mut self, id: impl Into<String>) -> Self {
        self.failing_ids.insert(id.into());
        self
    }

    /// IDs of registered triggers, sorted.
    pub async fn registered_ids(&self) -> Vec<String> {
        self.inner.read().await.triggers.keys().cloned().collect()
    }

    /// Every ID passed to `cancel`, in call order.
    pub async fn cancelled_ids(&self) -> Vec<String> {
        self.inner.read().await.cancelled.clone()
    }

    /// Channels created so far.
    pub async fn channels(&self) -> Vec<Channel> {
        self.inner.read().await.channels.clone()
    }
}

#[async_trait]
impl NotificationCenter for InMemoryNotificationCenter {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(self.permission)
    }

    async fn ensure_channel(&self, channel: &Channel) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.channels.iter().any(|c| c.id == channel.id) {
            inner.channels.push(channel.clone());
        }
        Ok(())
    }

    async fn schedule(&self, request: TriggerRequest) -> Result<()> {
        if self.failing_ids.contains(&request.id) {
            return Err(ReminderError::Scheduling(format!(
                "platform rejected trigger {}",
                request.id
            )));
        }
        self.inner
            .write()
            .await
            .triggers
            .insert(request.id.clone(), request);
        Ok(())
    }

    async fn cancel(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.triggers.remove(id);
        inner.cancelled.push(id.to_string());
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<TriggerRequest>> {
        Ok(self.inner.read().await.triggers.values().cloned().collect())
    }
}
