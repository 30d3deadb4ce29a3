//! Notification center backed by a JSON trigger table on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::center::{Channel, NotificationCenter, PermissionStatus, TriggerRequest};
use crate::error::Result;

#[derive(Debug, Default, Serialize, Deserialize)]
struct TriggerTable {
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    triggers: BTreeMap<String, TriggerRequest>,
}

/// A [`NotificationCenter`] that persists triggers to a JSON file.
///
/// A local agent (or a desktop notifier) reads the file and fires
/// notifications at their timestamps. Permission is always granted.
pub struct FileNotificationCenter {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileNotificationCenter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<TriggerTable> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(TriggerTable::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn store(&self, table: &TriggerTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(table)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationCenter for FileNotificationCenter {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn ensure_channel(&self, channel: &Channel) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        if table.channels.iter().any(|c| c.id == channel.id) {
            return Ok(());
        }
        table.channels.push(channel.clone());
        self.store(&table).await
    }

    async fn schedule(&self, request: TriggerRequest) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        debug!(id = %request.id, path = %self.path.display(), "Writing trigger");
        table.triggers.insert(request.id.clone(), request);
        self.store(&table).await
    }

    async fn cancel(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        if table.triggers.remove(id).is_some() {
            self.store(&table).await?;
        }
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<TriggerRequest>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.triggers.into_values().collect())
    }
}
