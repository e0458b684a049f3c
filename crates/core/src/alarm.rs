// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm definitions.
//!
//! An `Alarm` is the user-edited definition. Each concrete firing is an
//! [`AlarmInstance`] materialized from it with a snapshot of its alert
//! settings.

use crate::id::{AlarmId, InstanceId};
use crate::instance::AlarmInstance;
use crate::trigger::{next_trigger, next_trigger_after, TimeOfDay};
use crate::week::WeekPattern;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What sounds when an alarm fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    /// No sound
    Silent,
    /// Ringtone reference (URI-like token, resolved externally)
    Ringtone(String),
}

impl Alert {
    /// Parse a configured alert; `silent` (any case) or an empty string
    /// means no sound.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("silent") {
            Alert::Silent
        } else {
            Alert::Ringtone(trimmed.to_string())
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Alert::Silent)
    }
}

impl Default for Alert {
    fn default() -> Self {
        Alert::Ringtone(DEFAULT_ALERT_URI.to_string())
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::Silent => write!(f, "silent"),
            Alert::Ringtone(uri) => write!(f, "{}", uri),
        }
    }
}

/// Ringtone used when nothing else has been chosen.
pub const DEFAULT_ALERT_URI: &str = "content://settings/system/alarm_alert";

/// Why an alarm was edited.
///
/// Decides whether an in-progress snooze survives the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmChange {
    /// Time, repeat days, or enabled flag changed; every pending firing is
    /// replaced.
    TimingChange,
    /// Only label, alert, or vibrate changed; a snoozed firing is kept.
    CosmeticChange,
}

impl AlarmChange {
    /// Classify an edit by comparing the stored and edited definitions.
    ///
    /// An edit that changes nothing is treated as a timing change so the
    /// pending firing is recomputed.
    pub fn between(old: &Alarm, new: &Alarm) -> Self {
        let timing_same =
            old.time == new.time && old.days == new.days && old.enabled == new.enabled;
        let cosmetic_same =
            old.label == new.label && old.alert == new.alert && old.vibrate == new.vibrate;
        if timing_same && !cosmetic_same {
            AlarmChange::CosmeticChange
        } else {
            AlarmChange::TimingChange
        }
    }
}

impl fmt::Display for AlarmChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmChange::TimingChange => write!(f, "timing"),
            AlarmChange::CosmeticChange => write!(f, "cosmetic"),
        }
    }
}

/// A user-defined alarm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    #[serde(default)]
    pub id: AlarmId,
    pub time: TimeOfDay,
    pub enabled: bool,
    #[serde(default)]
    pub days: WeekPattern,
    #[serde(default)]
    pub label: String,
    pub alert: Alert,
    pub vibrate: bool,
}

impl Alarm {
    /// A new, enabled, non-repeating alarm that has not been persisted.
    pub fn new(time: TimeOfDay, alert: Alert) -> Self {
        Self {
            id: AlarmId::INVALID,
            time,
            enabled: true,
            days: WeekPattern::NONE,
            label: String::new(),
            alert,
            vibrate: true,
        }
    }

    pub fn is_repeating(&self) -> bool {
        self.days.is_repeating()
    }

    /// Next firing at or after `now`; `None` while disabled.
    pub fn next_trigger(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        next_trigger(self.time, self.days, self.enabled, now)
    }

    /// Whether a one-shot alarm would next fire tomorrow rather than today.
    pub fn is_tomorrow(&self, now: NaiveDateTime) -> bool {
        if self.is_repeating() {
            return false;
        }
        next_trigger(self.time, self.days, true, now)
            .is_some_and(|next| next.date() > now.date())
    }

    /// Materialize the next firing at or after `now`.
    ///
    /// Returns `None` while disabled. The instance copies the alert, vibrate
    /// and label settings so later edits do not change it.
    pub fn create_instance(&self, now: NaiveDateTime) -> Option<AlarmInstance> {
        self.next_trigger(now)
            .map(|fire_at| AlarmInstance::scheduled(InstanceId::INVALID, self, fire_at, now))
    }

    /// Materialize the firing after one that was just consumed at
    /// `consumed`.
    ///
    /// Only repeating, enabled alarms recur.
    pub fn create_instance_after(
        &self,
        consumed: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Option<AlarmInstance> {
        if !self.enabled || !self.is_repeating() {
            return None;
        }
        let after = consumed.max(now - Duration::seconds(1));
        next_trigger_after(self.time, self.days, after)
            .map(|fire_at| AlarmInstance::scheduled(InstanceId::INVALID, self, fire_at, now))
    }
}

/// Builder for `Alarm` with test defaults.
#[cfg(any(test, feature = "test-support"))]
pub struct AlarmBuilder {
    alarm: Alarm,
}

#[cfg(any(test, feature = "test-support"))]
impl AlarmBuilder {
    pub fn id(mut self, v: i64) -> Self {
        self.alarm.id = AlarmId::new(v);
        self
    }
    pub fn time(mut self, hour: u32, minute: u32) -> Self {
        self.alarm.time = TimeOfDay::clamped(hour, minute);
        self
    }
    pub fn enabled(mut self, v: bool) -> Self {
        self.alarm.enabled = v;
        self
    }
    pub fn days(mut self, days: impl IntoIterator<Item = chrono::Weekday>) -> Self {
        self.alarm.days = WeekPattern::from_days(days);
        self
    }
    pub fn label(mut self, v: impl Into<String>) -> Self {
        self.alarm.label = v.into();
        self
    }
    pub fn alert(mut self, v: Alert) -> Self {
        self.alarm.alert = v;
        self
    }
    pub fn vibrate(mut self, v: bool) -> Self {
        self.alarm.vibrate = v;
        self
    }
    pub fn build(self) -> Alarm {
        self.alarm
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Alarm {
    /// Create a builder for an enabled 07:00 one-shot alarm.
    pub fn builder() -> AlarmBuilder {
        AlarmBuilder {
            alarm: Alarm::new(TimeOfDay::clamped(7, 0), Alert::default()),
        }
    }
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
