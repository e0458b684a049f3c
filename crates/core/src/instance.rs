// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm instance identifier, state, and state machine.
//!
//! An instance is one concrete firing of an alarm. Time-driven transitions
//! (notification windows, firing, snooze expiry, missed detection) happen in
//! [`AlarmInstance::advance`]; user requests go through
//! [`AlarmInstance::snooze`], [`AlarmInstance::dismiss`] and
//! [`AlarmInstance::predismiss`]. Every method takes the current instant
//! and returns the effects the host must carry out.

use crate::alarm::{Alarm, Alert};
use crate::effect::{Effect, Transition};
use crate::id::{AlarmId, InstanceId};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lifecycle state of an alarm instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    /// Waiting for the fire instant
    Scheduled,
    /// Fire instant is approaching
    LowNotification,
    /// Fire instant is close
    HighNotification,
    /// Ringing
    Fired,
    /// Silenced until the snooze elapses
    Snoozed,
    /// Dismissed after ringing
    Dismissed,
    /// Dismissed before ringing
    Predismissed,
    /// Never acknowledged
    Missed,
}

impl InstanceState {
    /// No further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InstanceState::Dismissed | InstanceState::Predismissed | InstanceState::Missed
        )
    }

    /// Not yet rung.
    pub fn is_pre_fire(&self) -> bool {
        matches!(
            self,
            InstanceState::Scheduled
                | InstanceState::LowNotification
                | InstanceState::HighNotification
        )
    }

    /// States from which a preemptive dismiss is accepted.
    pub fn can_preemptively_dismiss(&self) -> bool {
        matches!(
            self,
            InstanceState::Snoozed
                | InstanceState::HighNotification
                | InstanceState::LowNotification
        )
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceState::Scheduled => write!(f, "scheduled"),
            InstanceState::LowNotification => write!(f, "low_notification"),
            InstanceState::HighNotification => write!(f, "high_notification"),
            InstanceState::Fired => write!(f, "fired"),
            InstanceState::Snoozed => write!(f, "snoozed"),
            InstanceState::Dismissed => write!(f, "dismissed"),
            InstanceState::Predismissed => write!(f, "predismissed"),
            InstanceState::Missed => write!(f, "missed"),
        }
    }
}

/// User request against an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceAction {
    Snooze,
    Dismiss,
    Predismiss,
}

impl fmt::Display for InstanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceAction::Snooze => write!(f, "snooze"),
            InstanceAction::Dismiss => write!(f, "dismiss"),
            InstanceAction::Predismiss => write!(f, "preemptively dismiss"),
        }
    }
}

/// Errors from instance state changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("instance {id} cannot {action} while {state}")]
    InvalidState {
        id: InstanceId,
        state: InstanceState,
        action: InstanceAction,
    },
}

/// Offsets that drive time-based transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceTimings {
    /// How long before firing the low notification starts
    pub low_notification: Duration,
    /// How long before firing the high notification starts
    pub high_notification: Duration,
    /// How late an unrung instance may still fire before it counts as missed
    pub missed_grace: Duration,
    /// How long an instance rings before it silences itself
    pub auto_silence: Duration,
}

impl Default for InstanceTimings {
    fn default() -> Self {
        Self {
            low_notification: Duration::hours(2),
            high_notification: Duration::minutes(30),
            missed_grace: Duration::minutes(30),
            auto_silence: Duration::minutes(10),
        }
    }
}

/// One materialized firing of an alarm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmInstance {
    #[serde(default)]
    pub id: InstanceId,
    pub alarm_id: AlarmId,
    pub fire_at: NaiveDateTime,
    pub state: InstanceState,
    /// Resume instant while snoozed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snoozed_until: Option<NaiveDateTime>,
    /// When the instance last started ringing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rang_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub label: String,
    pub alert: Alert,
    pub vibrate: bool,
    /// Instant of the last recorded transition
    pub updated_at: NaiveDateTime,
}

impl AlarmInstance {
    /// A scheduled instance with the alarm's alert settings copied in.
    pub fn scheduled(
        id: InstanceId,
        alarm: &Alarm,
        fire_at: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            alarm_id: alarm.id,
            fire_at,
            state: InstanceState::Scheduled,
            snoozed_until: None,
            rang_at: None,
            label: alarm.label.clone(),
            alert: alarm.alert.clone(),
            vibrate: alarm.vibrate,
            updated_at: now,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whether this instance still counts as the alarm's live firing.
    pub fn is_live(&self) -> bool {
        !self.state.is_terminal()
    }

    /// Whether the alert snapshot matches the alarm's current settings.
    pub fn matches_snapshot(&self, alarm: &Alarm) -> bool {
        self.alarm_id == alarm.id
            && self.label == alarm.label
            && self.alert == alarm.alert
            && self.vibrate == alarm.vibrate
    }

    pub fn low_notification_at(&self, timings: &InstanceTimings) -> NaiveDateTime {
        self.fire_at - timings.low_notification
    }

    pub fn high_notification_at(&self, timings: &InstanceTimings) -> NaiveDateTime {
        self.fire_at - timings.high_notification
    }

    /// Instant after which an unrung instance counts as missed.
    pub fn missed_at(&self, timings: &InstanceTimings) -> NaiveDateTime {
        self.fire_at + timings.missed_grace
    }

    /// Time left on the snooze, if snoozed.
    pub fn snooze_remaining(&self, now: NaiveDateTime) -> Option<Duration> {
        match (self.state, self.snoozed_until) {
            (InstanceState::Snoozed, Some(until)) => Some((until - now).max(Duration::zero())),
            _ => None,
        }
    }

    /// Instant of the next time-driven transition, if any.
    pub fn next_wakeup(&self, timings: &InstanceTimings) -> Option<NaiveDateTime> {
        match self.state {
            InstanceState::Scheduled => Some(self.low_notification_at(timings)),
            InstanceState::LowNotification => Some(self.high_notification_at(timings)),
            InstanceState::HighNotification => Some(self.fire_at),
            InstanceState::Fired => self.rang_at.map(|rang| rang + timings.auto_silence),
            InstanceState::Snoozed => self.snoozed_until,
            InstanceState::Dismissed | InstanceState::Predismissed | InstanceState::Missed => None,
        }
    }

    /// Effects that arm a freshly stored instance.
    pub fn arm(&self, timings: &InstanceTimings) -> Vec<Effect> {
        self.wakeup_effect(timings).into_iter().collect()
    }

    /// Effects that drop a pending instance without firing it.
    pub fn release(&self) -> Vec<Effect> {
        vec![Effect::CancelWakeup {
            instance_id: self.id,
        }]
    }

    /// Apply every time-driven transition due at `now`.
    ///
    /// Steps through each notification state in order, so a late tick still
    /// reports low and high before firing. An unrung instance older than the
    /// missed grace goes straight to `Missed`.
    pub fn advance(&mut self, now: NaiveDateTime, timings: &InstanceTimings) -> Vec<Effect> {
        let now = self.effective(now);
        let mut effects = Vec::new();
        while let Some(next) = self.due_transition(now, timings) {
            effects.extend(self.transition(next, now, timings));
        }
        effects
    }

    /// Mark an unrung instance whose deadline passed (device was off) as
    /// missed. Does nothing otherwise.
    pub fn detect_missed(&mut self, now: NaiveDateTime, timings: &InstanceTimings) -> Vec<Effect> {
        let now = self.effective(now);
        if self.state.is_pre_fire() && now >= self.missed_at(timings) {
            self.transition(InstanceState::Missed, now, timings)
        } else {
            Vec::new()
        }
    }

    /// Silence a ringing instance until `now + duration`.
    pub fn snooze(
        &mut self,
        now: NaiveDateTime,
        duration: Duration,
        timings: &InstanceTimings,
    ) -> Result<Vec<Effect>, InstanceError> {
        self.require(InstanceAction::Snooze, self.state == InstanceState::Fired)?;
        let now = self.effective(now);
        self.snoozed_until = Some(now + duration);
        Ok(self.transition(InstanceState::Snoozed, now, timings))
    }

    /// Dismiss a ringing or snoozed instance.
    pub fn dismiss(
        &mut self,
        now: NaiveDateTime,
        timings: &InstanceTimings,
    ) -> Result<Vec<Effect>, InstanceError> {
        let allowed = matches!(self.state, InstanceState::Fired | InstanceState::Snoozed);
        self.require(InstanceAction::Dismiss, allowed)?;
        let now = self.effective(now);
        Ok(self.transition(InstanceState::Dismissed, now, timings))
    }

    /// Dismiss a notifying or snoozed instance before it rings.
    pub fn predismiss(
        &mut self,
        now: NaiveDateTime,
        timings: &InstanceTimings,
    ) -> Result<Vec<Effect>, InstanceError> {
        self.require(
            InstanceAction::Predismiss,
            self.state.can_preemptively_dismiss(),
        )?;
        let now = self.effective(now);
        Ok(self.transition(InstanceState::Predismissed, now, timings))
    }

    fn require(&self, action: InstanceAction, allowed: bool) -> Result<(), InstanceError> {
        if allowed {
            Ok(())
        } else {
            Err(InstanceError::InvalidState {
                id: self.id,
                state: self.state,
                action,
            })
        }
    }

    /// Never compute with an instant earlier than the last transition.
    fn effective(&self, now: NaiveDateTime) -> NaiveDateTime {
        now.max(self.updated_at)
    }

    fn due_transition(
        &self,
        now: NaiveDateTime,
        timings: &InstanceTimings,
    ) -> Option<InstanceState> {
        match self.state {
            state if state.is_pre_fire() && now >= self.missed_at(timings) => {
                Some(InstanceState::Missed)
            }
            InstanceState::Scheduled if now >= self.low_notification_at(timings) => {
                Some(InstanceState::LowNotification)
            }
            InstanceState::LowNotification if now >= self.high_notification_at(timings) => {
                Some(InstanceState::HighNotification)
            }
            InstanceState::HighNotification if now >= self.fire_at => Some(InstanceState::Fired),
            InstanceState::Snoozed if self.snoozed_until.is_some_and(|until| now >= until) => {
                Some(InstanceState::Fired)
            }
            InstanceState::Fired
                if self
                    .rang_at
                    .is_some_and(|rang| now >= rang + timings.auto_silence) =>
            {
                Some(InstanceState::Missed)
            }
            _ => None,
        }
    }

    fn transition(
        &mut self,
        to: InstanceState,
        at: NaiveDateTime,
        timings: &InstanceTimings,
    ) -> Vec<Effect> {
        let from = self.state;
        self.state = to;
        self.updated_at = at;
        match to {
            InstanceState::Fired => {
                self.rang_at = Some(at);
                self.snoozed_until = None;
            }
            InstanceState::Snoozed => {}
            _ => self.snoozed_until = None,
        }

        let mut effects = vec![Effect::Notify {
            transition: Transition {
                instance_id: self.id,
                alarm_id: self.alarm_id,
                from,
                to,
                at,
            },
        }];
        if to.is_terminal() {
            effects.extend(self.release());
        } else {
            effects.extend(self.wakeup_effect(timings));
        }
        effects
    }

    fn wakeup_effect(&self, timings: &InstanceTimings) -> Option<Effect> {
        self.next_wakeup(timings).map(|at| Effect::ScheduleWakeup {
            instance_id: self.id,
            at,
        })
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
