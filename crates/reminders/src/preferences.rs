//! Client-side preferences and persisted app state.
//!
//! Nothing here is synced to the server. State lives in a single JSON file
//! with explicit [`ClientStateStore::load`] and [`ClientStateStore::save`]
//! boundaries.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ReminderError, Result};
use crate::time::{validate_weekday, TimeOfDay, SATURDAY, SUNDAY};

/// Legacy single-frequency reminder setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

/// Reminder configuration: time of day plus a set of weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredPreferences")]
pub struct NotificationPreferences {
    /// Whether reminders should be registered at all.
    pub enabled: bool,
    /// Wall-clock time the reminder fires.
    pub time: TimeOfDay,
    /// Weekdays (0 = Sunday) the reminder fires on.
    days: BTreeSet<u8>,
}

impl Default for NotificationPreferences {
    /// Enabled, 20:00, Sundays.
    fn default() -> Self {
        Self {
            enabled: true,
            time: TimeOfDay::default(),
            days: BTreeSet::from([SUNDAY]),
        }
    }
}

impl NotificationPreferences {
    /// Build preferences from a validated set of days.
    pub fn new(enabled: bool, time: TimeOfDay, days: impl IntoIterator<Item = u8>) -> Result<Self> {
        let mut prefs = Self {
            enabled,
            time,
            days: BTreeSet::new(),
        };
        prefs.set_days(days)?;
        Ok(prefs)
    }

    /// Convert a legacy frequency setting. `Daily` selects every day.
    pub fn from_frequency(
        enabled: bool,
        time: TimeOfDay,
        frequency: Frequency,
        day: u8,
    ) -> Result<Self> {
        match frequency {
            Frequency::Daily => Self::new(enabled, time, SUNDAY..=SATURDAY),
            Frequency::Weekly => Self::new(enabled, time, [validate_weekday(day)?]),
        }
    }

    /// Selected weekdays in ascending order.
    pub fn days(&self) -> &BTreeSet<u8> {
        &self.days
    }

    /// Replace the selected weekdays.
    pub fn set_days(&mut self, days: impl IntoIterator<Item = u8>) -> Result<()> {
        let days = days
            .into_iter()
            .map(validate_weekday)
            .collect::<Result<BTreeSet<u8>>>()?;
        self.days = days;
        Ok(())
    }

    /// Select `day` if it is not selected, otherwise deselect it.
    pub fn toggle_day(&mut self, day: u8) -> Result<()> {
        let day = validate_weekday(day)?;
        if !self.days.remove(&day) {
            self.days.insert(day);
        }
        Ok(())
    }

    pub fn set_time(&mut self, time: TimeOfDay) {
        self.time = time;
    }
}

/// On-disk shape, accepting both the weekday-set form and the legacy
/// frequency + single day form.
#[derive(Deserialize)]
struct StoredPreferences {
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    time: TimeOfDay,
    #[serde(default)]
    days: Option<Vec<u8>>,
    #[serde(default)]
    frequency: Option<Frequency>,
    #[serde(default)]
    day: Option<u8>,
}

fn default_enabled() -> bool {
    true
}

impl TryFrom<StoredPreferences> for NotificationPreferences {
    type Error = ReminderError;

    fn try_from(stored: StoredPreferences) -> Result<Self> {
        match (stored.days, stored.frequency) {
            (Some(days), _) => Self::new(stored.enabled, stored.time, days),
            (None, Some(frequency)) => Self::from_frequency(
                stored.enabled,
                stored.time,
                frequency,
                stored.day.unwrap_or(SUNDAY),
            ),
            (None, None) => Ok(Self {
                enabled: stored.enabled,
                time: stored.time,
                ..Self::default()
            }),
        }
    }
}

/// Everything the client persists locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    #[serde(default)]
    pub has_finished_onboarding: bool,
    #[serde(default)]
    pub notifications: NotificationPreferences,
}

/// A [`ClientState`] bound to the file it was loaded from.
#[derive(Debug, Clone)]
pub struct ClientStateStore {
    path: PathBuf,
    state: ClientState,
}

impl ClientStateStore {
    /// Load state from `path`. A missing file yields default state.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No client state yet, using defaults");
                ClientState::default()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, state })
    }

    /// Write the current state back to its file.
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(&self.state)?;
        tokio::fs::write(&self.path, json).await?;
        info!(path = %self.path.display(), "Saved client state");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ClientState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = NotificationPreferences::default();
        assert!(prefs.enabled);
        assert_eq!(prefs.time.to_string(), "20:00");
        assert_eq!(prefs.days().iter().copied().collect::<Vec<_>>(), vec![0]);
        assert!(!ClientState::default().has_finished_onboarding);
    }

    #[test]
    fn test_toggle_day_keeps_days_sorted() {
        let mut prefs = NotificationPreferences::default();
        prefs.toggle_day(3).unwrap();
        prefs.toggle_day(1).unwrap();
        assert_eq!(prefs.days().iter().copied().collect::<Vec<_>>(), vec![0, 1, 3]);

        prefs.toggle_day(0).unwrap();
        assert_eq!(prefs.days().iter().copied().collect::<Vec<_>>(), vec![1, 3]);

        assert!(matches!(
            prefs.toggle_day(9),
            Err(ReminderError::InvalidWeekday(9))
        ));
    }

    #[test]
    fn test_set_days_rejects_invalid_without_change() {
        let mut prefs = NotificationPreferences::default();
        assert!(prefs.set_days([1, 8]).is_err());
        assert_eq!(prefs.days().len(), 1);

        prefs.set_days([5, 1, 5]).unwrap();
        assert_eq!(prefs.days().iter().copied().collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn test_deserialize_weekday_set_form() {
        let prefs: NotificationPreferences =
            serde_json::from_str(r#"{"enabled":false,"time":"07:30","days":[6,2]}"#).unwrap();
        assert!(!prefs.enabled);
        assert_eq!(prefs.time, TimeOfDay::new(7, 30).unwrap());
        assert_eq!(prefs.days().iter().copied().collect::<Vec<_>>(), vec![2, 6]);
    }

    #[test]
    fn test_deserialize_legacy_frequency_forms() {
        let daily: NotificationPreferences =
            serde_json::from_str(r#"{"time":"08:00","frequency":"daily"}"#).unwrap();
        assert_eq!(daily.days().len(), 7);

        let weekly: NotificationPreferences =
            serde_json::from_str(r#"{"time":"08:00","frequency":"weekly","day":3}"#).unwrap();
        assert_eq!(weekly.days().iter().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_deserialize_rejects_bad_weekday() {
        let result: std::result::Result<NotificationPreferences, _> =
            serde_json::from_str(r#"{"time":"08:00","days":[7]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_canonical_form() {
        let prefs = NotificationPreferences::new(true, TimeOfDay::new(21, 15).unwrap(), [4, 2])
            .unwrap();
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"enabled": true, "time": "21:15", "days": [2, 4]})
        );
        let back: NotificationPreferences = serde_json::from_value(value).unwrap();
        assert_eq!(back, prefs);
    }

    #[tokio::test]
    async fn test_store_load_missing_then_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("gr8life-state-{}", std::process::id()));
        let path = dir.join("state.json");
        let _ = tokio::fs::remove_dir_all(&dir).await;

        let mut store = ClientStateStore::load(&path).await.unwrap();
        assert_eq!(store.state(), &ClientState::default());

        store.state_mut().has_finished_onboarding = true;
        store.state_mut().notifications.toggle_day(5).unwrap();
        store.save().await.unwrap();

        let reloaded = ClientStateStore::load(&path).await.unwrap();
        assert!(reloaded.state().has_finished_onboarding);
        assert_eq!(
            reloaded.state().notifications.days().iter().copied().collect::<Vec<_>>(),
            vec![0, 5]
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
