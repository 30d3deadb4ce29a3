//! Time-of-day and weekday values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ReminderError, Result};

/// Sunday, in the 0 = Sunday .. 6 = Saturday weekday domain.
pub const SUNDAY: u8 = 0;

/// Saturday, in the 0 = Sunday .. 6 = Saturday weekday domain.
pub const SATURDAY: u8 = 6;

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Check that `day` is within 0 (Sunday) ..= 6 (Saturday).
pub fn validate_weekday(day: u8) -> Result<u8> {
    if day > SATURDAY {
        return Err(ReminderError::InvalidWeekday(day));
    }
    Ok(day)
}

/// Short English name for a validated weekday.
pub fn weekday_name(day: u8) -> &'static str {
    WEEKDAY_NAMES.get(usize::from(day)).copied().unwrap_or("?")
}

/// A wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Create a time of day, validating `hour < 24` and `minute < 60`.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(ReminderError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// As a `NaiveTime` with zero seconds.
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Local time of day of an RFC 3339 timestamp.
    pub fn from_timestamp(value: &str) -> Result<Self> {
        let parsed = DateTime::parse_from_rfc3339(value)
            .map_err(|_| ReminderError::InvalidTime(value.to_string()))?;
        let local = parsed.with_timezone(&Local);
        Self::new(local.hour() as u8, local.minute() as u8)
    }
}

impl Default for TimeOfDay {
    /// 20:00.
    fn default() -> Self {
        Self {
            hour: 20,
            minute: 0,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ReminderError;

    /// Accepts `HH:MM`, or an RFC 3339 timestamp whose local time is used.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some((hour, minute)) = s.split_once(':') {
            if let (Ok(hour), Ok(minute)) = (hour.parse::<u8>(), minute.parse::<u8>()) {
                return Self::new(hour, minute);
            }
        }
        Self::from_timestamp(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
