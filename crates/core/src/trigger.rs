// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Next-trigger computation for alarms.
//!
//! Pure functions of (time of day, repeat pattern, enabled, reference
//! instant). The reference instant is always passed in.

use crate::week::WeekPattern;
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rejected time-of-day input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeOfDayError {
    #[error("hour out of range: {0} (expected 0-23)")]
    Hour(u32),
    #[error("minute out of range: {0} (expected 0-59)")]
    Minute(u32),
    #[error("invalid time '{0}' (expected HH:MM)")]
    Format(String),
}

/// Hour and minute of an alarm, always a valid time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTimeOfDay", into = "RawTimeOfDay")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

#[derive(Serialize, Deserialize)]
struct RawTimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeOfDayError> {
        if hour > 23 {
            return Err(TimeOfDayError::Hour(hour));
        }
        if minute > 59 {
            return Err(TimeOfDayError::Minute(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Build a time of day, clamping out-of-range parts to 23:59.
    #[cfg(any(test, feature = "test-support"))]
    pub const fn clamped(hour: u32, minute: u32) -> Self {
        let hour = if hour > 23 { 23 } else { hour };
        let minute = if minute > 59 { 59 } else { minute };
        Self {
            hour: hour as u8,
            minute: minute as u8,
        }
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    /// This time of day on the date of `day`.
    pub fn on(&self, day: NaiveDateTime) -> NaiveDateTime {
        day.date().and_time(self.as_naive_time())
    }

    fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::MIN
            + Duration::hours(i64::from(self.hour))
            + Duration::minutes(i64::from(self.minute))
    }
}

impl TryFrom<RawTimeOfDay> for TimeOfDay {
    type Error = TimeOfDayError;

    fn try_from(raw: RawTimeOfDay) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute)
    }
}

impl From<TimeOfDay> for RawTimeOfDay {
    fn from(time: TimeOfDay) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || TimeOfDayError::Format(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(format_err)?;
        let hour = h.parse::<u32>().map_err(|_| format_err())?;
        let minute = m.parse::<u32>().map_err(|_| format_err())?;
        Self::new(hour, minute)
    }
}

/// Next instant at or after `now` at which an alarm should fire.
///
/// Returns `None` for a disabled alarm. A candidate equal to `now` has not
/// yet passed and is returned as-is.
pub fn next_trigger(
    time: TimeOfDay,
    pattern: WeekPattern,
    enabled: bool,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    if !enabled {
        return None;
    }
    let today = time.on(now);
    if !pattern.is_repeating() {
        return Some(if today >= now {
            today
        } else {
            today + Duration::days(1)
        });
    }

    let weekday = now.weekday();
    (0..=7_i64)
        .filter(|offset| pattern.is_set(weekday_after(weekday, *offset)))
        .map(|offset| today + Duration::days(offset))
        .find(|candidate| *candidate >= now)
}

/// Next firing strictly after `after`, ignoring the enabled flag.
///
/// Used to re-arm a repeating alarm once an instance has been consumed, so
/// the consumed firing is never produced again.
pub fn next_trigger_after(
    time: TimeOfDay,
    pattern: WeekPattern,
    after: NaiveDateTime,
) -> Option<NaiveDateTime> {
    next_trigger(time, pattern, true, after + Duration::seconds(1))
}

fn weekday_after(day: chrono::Weekday, offset: i64) -> chrono::Weekday {
    let mut day = day;
    for _ in 0..offset.rem_euclid(7) {
        day = day.succ();
    }
    day
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
