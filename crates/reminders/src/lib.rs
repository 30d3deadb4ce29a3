//! Check-in reminders for gr8life.
//!
//! Reminders are local notifications: a time of day plus a set of weekdays,
//! stored client-side and registered with the platform's notification
//! facility as one weekly-repeating trigger per selected day.
//!
//! - [`NotificationPreferences`] / [`ClientStateStore`] - Persisted client state
//! - [`next_weekly_trigger`] / [`next_daily_trigger`] - Next-occurrence math
//! - [`NotificationCenter`] - Trait for the platform notification facility
//! - [`ReminderScheduler`] - Cancel-then-register scheduling over a center
//!
//! # Example
//!
//! ```rust
//! use reminders::{InMemoryNotificationCenter, NotificationPreferences, ReminderScheduler};
//!
//! # async fn example() {
//! let scheduler = ReminderScheduler::new(InMemoryNotificationCenter::new());
//! let outcome = scheduler.apply(&NotificationPreferences::default()).await;
//! assert_eq!(outcome.registered.len(), 1);
//! # }
//! ```

mod center;
mod error;
mod file;
mod memory;
mod preferences;
mod scheduler;
mod time;
mod trigger;

pub use center::{Channel, NotificationCenter, PermissionStatus, RepeatFrequency, TriggerRequest};
pub use error::{ReminderError, Result};
pub use file::FileNotificationCenter;
pub use memory::InMemoryNotificationCenter;
pub use preferences::{ClientState, ClientStateStore, Frequency, NotificationPreferences};
pub use scheduler::{
    known_reminder_ids, reminder_id, ReminderScheduler, ScheduleOutcome, ScheduledTrigger,
    CHANNEL_ID, LEGACY_REMINDER_ID,
};
pub use time::{validate_weekday, weekday_name, TimeOfDay, SATURDAY, SUNDAY};
pub use trigger::{next_daily_trigger, next_weekly_trigger};
