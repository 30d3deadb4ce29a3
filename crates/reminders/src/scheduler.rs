//! Registering and cancelling check-in reminders.

use std::collections::BTreeSet;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::center::{Channel, NotificationCenter, PermissionStatus, RepeatFrequency, TriggerRequest};
use crate::preferences::{Frequency, NotificationPreferences};
use crate::time::{weekday_name, TimeOfDay};
use crate::trigger::{next_daily_trigger, next_weekly_trigger};

/// Channel all reminders are posted on.
pub const CHANNEL_ID: &str = "gr8life-reminders";

/// Identifier of the single trigger used by the legacy frequency scheme.
pub const LEGACY_REMINDER_ID: &str = "daily-check-in";

const REMINDER_TITLE: &str = "Time to check in!";
const REMINDER_BODY: &str = "Take a moment to reflect on your 8 pillars of life.";

/// Trigger identifier for a weekday (0 = Sunday).
pub fn reminder_id(weekday: u8) -> String {
    format!("{LEGACY_REMINDER_ID}-{weekday}")
}

/// Every identifier this scheduler may have registered.
pub fn known_reminder_ids() -> Vec<String> {
    std::iter::once(LEGACY_REMINDER_ID.to_string())
        .chain((0..7).map(reminder_id))
        .collect()
}

/// A trigger that was successfully registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledTrigger {
    pub id: String,
    pub fires_at_millis: i64,
    pub repeat: RepeatFrequency,
}

/// Result of a scheduling pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleOutcome {
    /// Permission reported by the platform, or `None` if it was never asked.
    pub permission: Option<PermissionStatus>,
    pub registered: Vec<ScheduledTrigger>,
    /// IDs whose registration the platform rejected.
    pub failed: Vec<String>,
}

impl ScheduleOutcome {
    fn new(permission: Option<PermissionStatus>) -> Self {
        Self {
            permission,
            registered: Vec::new(),
            failed: Vec::new(),
        }
    }
}

/// Schedules recurring check-in reminders on a [`NotificationCenter`].
///
/// Every pass cancels all known reminder IDs before registering, so
/// repeated calls with the same input leave exactly one trigger per day.
/// Platform failures never propagate: permission denial skips registration
/// (stale triggers are still cancelled) and rejected registrations are
/// logged and reported in [`ScheduleOutcome::failed`].
pub struct ReminderScheduler<C> {
    center: C,
}

impl<C: NotificationCenter> ReminderScheduler<C> {
    pub fn new(center: C) -> Self {
        Self { center }
    }

    pub fn center(&self) -> &C {
        &self.center
    }

    /// Register or cancel reminders to match `prefs`, relative to the local clock.
    pub async fn apply(&self, prefs: &NotificationPreferences) -> ScheduleOutcome {
        if prefs.enabled {
            self.schedule(prefs.time, prefs.days()).await
        } else {
            self.cancel().await;
            ScheduleOutcome::new(None)
        }
    }

    /// Schedule one weekly reminder per selected weekday, relative to the local clock.
    pub async fn schedule(&self, time: TimeOfDay, days: &BTreeSet<u8>) -> ScheduleOutcome {
        self.schedule_at(&Local::now(), time, days).await
    }

    /// Schedule one weekly reminder per selected weekday, relative to `now`.
    pub async fn schedule_at<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        time: TimeOfDay,
        days: &BTreeSet<u8>,
    ) -> ScheduleOutcome {
        let permission = self.prepare().await;
        self.cancel().await;

        let mut outcome = ScheduleOutcome::new(Some(permission));
        if permission == PermissionStatus::Denied {
            return outcome;
        }

        for &day in days {
            let fires_at = next_weekly_trigger(now, day, time);
            let request = trigger_request(
                reminder_id(day),
                fires_at.timestamp_millis(),
                RepeatFrequency::Weekly,
            );
            if self.register(request, &mut outcome).await {
                info!(day = weekday_name(day), fires_at = %fires_at.naive_local(), "Reminder scheduled");
            }
        }

        outcome
    }

    /// Schedule the single legacy reminder for a frequency setting.
    ///
    /// `Daily` fires every day at `time`; `Weekly` fires on `day` (0 = Sunday).
    pub async fn schedule_legacy_at<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        time: TimeOfDay,
        frequency: Frequency,
        day: u8,
    ) -> ScheduleOutcome {
        let permission = self.prepare().await;
        self.cancel().await;

        let mut outcome = ScheduleOutcome::new(Some(permission));
        if permission == PermissionStatus::Denied {
            return outcome;
        }

        let (fires_at, repeat) = match frequency {
            Frequency::Daily => (next_daily_trigger(now, time), RepeatFrequency::Daily),
            Frequency::Weekly => (next_weekly_trigger(now, day, time), RepeatFrequency::Weekly),
        };

        let request = trigger_request(
            LEGACY_REMINDER_ID.to_string(),
            fires_at.timestamp_millis(),
            repeat,
        );
        if self.register(request, &mut outcome).await {
            info!(?frequency, fires_at = %fires_at.naive_local(), "Reminder scheduled");
        }
        outcome
    }

    /// Cancel every reminder this scheduler may have registered.
    pub async fn cancel(&self) {
        for id in known_reminder_ids() {
            if let Err(err) = self.center.cancel(&id).await {
                warn!(id = %id, error = %err, "Failed to cancel reminder");
            }
        }
        info!("Reminders cancelled");
    }

    /// Request permission and, if granted, create the channel.
    ///
    /// A failed permission request counts as denied.
    async fn prepare(&self) -> PermissionStatus {
        match self.center.request_permission().await {
            Ok(PermissionStatus::Granted) => {}
            Ok(PermissionStatus::Denied) => {
                warn!("Notification permission denied; reminders will not fire");
                return PermissionStatus::Denied;
            }
            Err(err) => {
                warn!(error = %err, "Notification permission request failed; reminders will not fire");
                return PermissionStatus::Denied;
            }
        }

        let channel = Channel {
            id: CHANNEL_ID.to_string(),
            name: "Check-in Reminders".to_string(),
            high_importance: true,
        };
        if let Err(err) = self.center.ensure_channel(&channel).await {
            warn!(error = %err, "Failed to create notification channel");
        }

        PermissionStatus::Granted
    }

    async fn register(&self, request: TriggerRequest, outcome: &mut ScheduleOutcome) -> bool {
        let id = request.id.clone();
        let fires_at_millis = request.timestamp_millis;
        let repeat = request.repeat;

        match self.center.schedule(request).await {
            Ok(()) => {
                outcome.registered.push(ScheduledTrigger {
                    id,
                    fires_at_millis,
                    repeat,
                });
                true
            }
            Err(err) => {
                error!(id = %id, error = %err, "Failed to register reminder");
                outcome.failed.push(id);
                false
            }
        }
    }
}

fn trigger_request(id: String, timestamp_millis: i64, repeat: RepeatFrequency) -> TriggerRequest {
    TriggerRequest {
        id,
        channel_id: CHANNEL_ID.to_string(),
        title: REMINDER_TITLE.to_string(),
        body: REMINDER_BODY.to_string(),
        timestamp_millis,
        repeat,
    }
}
