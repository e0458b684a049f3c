// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown timers.
//!
//! A running timer stores the remaining time at its anchor instant and
//! derives the live value from the reference instant, so no tick loop is
//! needed to keep it current.

use crate::effect::{Effect, TimerTransition};
use crate::id::TimerId;
use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Time added by one press of "+1 minute".
pub const MINUTE_MS: i64 = 60_000;

/// Lifecycle state of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Reset,
    Running,
    Paused,
    /// Reached zero and is sounding
    Expired,
    /// Sounded past the missed threshold without being handled
    Missed,
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerState::Reset => write!(f, "reset"),
            TimerState::Running => write!(f, "running"),
            TimerState::Paused => write!(f, "paused"),
            TimerState::Expired => write!(f, "expired"),
            TimerState::Missed => write!(f, "missed"),
        }
    }
}

/// User action on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerAction {
    Start,
    Pause,
    AddMinute,
    Reset,
}

impl fmt::Display for TimerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerAction::Start => write!(f, "start"),
            TimerAction::Pause => write!(f, "pause"),
            TimerAction::AddMinute => write!(f, "add a minute"),
            TimerAction::Reset => write!(f, "reset"),
        }
    }
}

/// Errors from timer state changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("timer {id} cannot {action} while {state}")]
    InvalidState {
        id: TimerId,
        state: TimerState,
        action: TimerAction,
    },
    #[error("timer length must be positive, got {0}ms")]
    InvalidLength(i64),
}

/// A countdown timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    #[serde(default)]
    pub id: TimerId,
    #[serde(default)]
    pub label: String,
    /// Length the timer was created with
    pub length_ms: i64,
    /// Length including every added minute
    pub total_ms: i64,
    /// Remaining time at `anchor`, or the frozen value when not running
    pub remaining_ms: i64,
    /// Instant `remaining_ms` was last measured, set only while running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<NaiveDateTime>,
    /// Instant the countdown reached zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<NaiveDateTime>,
    pub state: TimerState,
}

impl Timer {
    pub fn new(label: impl Into<String>, length: Duration) -> Result<Self, TimerError> {
        let length_ms = length.num_milliseconds();
        if length_ms <= 0 {
            return Err(TimerError::InvalidLength(length_ms));
        }
        Ok(Self {
            id: TimerId::INVALID,
            label: label.into(),
            length_ms,
            total_ms: length_ms,
            remaining_ms: length_ms,
            anchor: None,
            expired_at: None,
            state: TimerState::Reset,
        })
    }

    /// Remaining time at `now`, never below zero.
    pub fn remaining_ms(&self, now: NaiveDateTime) -> i64 {
        self.raw_remaining_ms(now).max(0)
    }

    /// Time since expiry for an expired or missed timer, zero otherwise.
    pub fn overdue_ms(&self, now: NaiveDateTime) -> i64 {
        match (self.state, self.expired_at) {
            (TimerState::Expired | TimerState::Missed, Some(at)) => {
                (now - at).num_milliseconds().max(0)
            }
            _ => 0,
        }
    }

    pub fn start(&mut self, now: NaiveDateTime) -> Result<Vec<Effect>, TimerError> {
        self.require(
            TimerAction::Start,
            matches!(self.state, TimerState::Reset | TimerState::Paused),
        )?;
        self.anchor = Some(now);
        Ok(self.transition(TimerState::Running, now))
    }

    pub fn pause(&mut self, now: NaiveDateTime) -> Result<Vec<Effect>, TimerError> {
        self.require(TimerAction::Pause, self.state == TimerState::Running)?;
        self.remaining_ms = self.remaining_ms(now);
        self.anchor = None;
        Ok(self.transition(TimerState::Paused, now))
    }

    /// Add one minute to a running, expired or missed timer.
    ///
    /// An expired or missed timer restarts with exactly one minute left.
    pub fn add_minute(&mut self, now: NaiveDateTime) -> Result<Vec<Effect>, TimerError> {
        match self.state {
            TimerState::Running => {
                self.total_ms += MINUTE_MS;
                self.remaining_ms += MINUTE_MS;
                Ok(Vec::new())
            }
            TimerState::Expired | TimerState::Missed => {
                self.total_ms += MINUTE_MS;
                self.remaining_ms = MINUTE_MS;
                self.anchor = Some(now);
                self.expired_at = None;
                Ok(self.transition(TimerState::Running, now))
            }
            TimerState::Reset | TimerState::Paused => Err(self.invalid(TimerAction::AddMinute)),
        }
    }

    /// Return to the original length from any state; added time is
    /// discarded.
    pub fn reset(&mut self, now: NaiveDateTime) -> Vec<Effect> {
        self.total_ms = self.length_ms;
        self.remaining_ms = self.length_ms;
        self.anchor = None;
        self.expired_at = None;
        if self.state == TimerState::Reset {
            return Vec::new();
        }
        self.transition(TimerState::Reset, now)
    }

    /// Move a running timer that has reached zero to `Expired`.
    pub fn check_expiry(&mut self, now: NaiveDateTime) -> Vec<Effect> {
        if self.state != TimerState::Running || self.raw_remaining_ms(now) > 0 {
            return Vec::new();
        }
        let expired_at = self
            .anchor
            .map(|anchor| anchor + Duration::milliseconds(self.remaining_ms.max(0)))
            .unwrap_or(now);
        self.remaining_ms = 0;
        self.anchor = None;
        self.expired_at = Some(expired_at);
        self.transition(TimerState::Expired, expired_at)
    }

    /// Move a timer that has been expired for at least `threshold` to
    /// `Missed`.
    pub fn check_missed(&mut self, now: NaiveDateTime, threshold: Duration) -> Vec<Effect> {
        match (self.state, self.expired_at) {
            (TimerState::Expired, Some(at)) if now - at >= threshold => {
                self.transition(TimerState::Missed, now)
            }
            _ => Vec::new(),
        }
    }

    /// Main button: reset a stopped timer, add time to a live one.
    pub fn primary_action(&self) -> TimerAction {
        match self.state {
            TimerState::Reset | TimerState::Paused => TimerAction::Reset,
            TimerState::Running | TimerState::Expired | TimerState::Missed => {
                TimerAction::AddMinute
            }
        }
    }

    /// Play/pause button, absent once the timer has expired.
    pub fn toggle_action(&self) -> Option<TimerAction> {
        match self.state {
            TimerState::Reset | TimerState::Paused => Some(TimerAction::Start),
            TimerState::Running => Some(TimerAction::Pause),
            TimerState::Expired | TimerState::Missed => None,
        }
    }

    /// Whether the remaining-time text is in the off half of its blink.
    pub fn blink_hidden(&self, now: NaiveDateTime) -> bool {
        let blinking = matches!(
            self.state,
            TimerState::Expired | TimerState::Missed | TimerState::Paused
        );
        blinking && (now.nanosecond() / 1_000_000) % 1000 >= 500
    }

    fn raw_remaining_ms(&self, now: NaiveDateTime) -> i64 {
        match (self.state, self.anchor) {
            (TimerState::Running, Some(anchor)) => {
                let elapsed = (now - anchor).num_milliseconds().max(0);
                self.remaining_ms - elapsed
            }
            _ => self.remaining_ms,
        }
    }

    fn require(&self, action: TimerAction, allowed: bool) -> Result<(), TimerError> {
        if allowed {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: TimerAction) -> TimerError {
        TimerError::InvalidState {
            id: self.id,
            state: self.state,
            action,
        }
    }

    fn transition(&mut self, to: TimerState, at: NaiveDateTime) -> Vec<Effect> {
        let from = self.state;
        self.state = to;
        vec![Effect::NotifyTimer {
            transition: TimerTransition {
                timer_id: self.id,
                from,
                to,
                at,
            },
        }]
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
