// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use chrono::{Duration, Weekday};
use std::path::PathBuf;
use tock_core::Alert;

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_positive(name: &str) -> Option<i64> {
    var(name)
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
}

fn parse_minutes(name: &str) -> Option<Duration> {
    parse_positive(name).map(Duration::minutes)
}

/// Resolve state directory: TOCK_STATE_DIR > XDG_STATE_HOME/tock > ~/.local/state/tock
pub fn state_dir() -> Option<PathBuf> {
    if let Some(dir) = var("TOCK_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    if let Some(xdg) = var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("tock"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/tock"))
}

/// Snooze length override
pub fn snooze() -> Option<Duration> {
    parse_minutes("TOCK_SNOOZE_MINUTES")
}

/// How long before firing the low notification starts
pub fn low_notification() -> Option<Duration> {
    parse_minutes("TOCK_LOW_NOTIFICATION_MINUTES")
}

/// How long before firing the high notification starts
pub fn high_notification() -> Option<Duration> {
    parse_minutes("TOCK_HIGH_NOTIFICATION_MINUTES")
}

pub fn missed_grace() -> Option<Duration> {
    parse_minutes("TOCK_MISSED_GRACE_MINUTES")
}

pub fn auto_silence() -> Option<Duration> {
    parse_minutes("TOCK_AUTO_SILENCE_MINUTES")
}

/// How long an expired timer sounds before it counts as missed
pub fn timer_missed() -> Option<Duration> {
    parse_positive("TOCK_TIMER_MISSED_SECS").map(Duration::seconds)
}

/// First day of the week for day listings (`sun`, `mon`, `sat`, ...)
pub fn first_day_of_week() -> Option<Weekday> {
    var("TOCK_FIRST_DAY_OF_WEEK").and_then(|s| s.trim().parse::<Weekday>().ok())
}

/// Alert given to new alarms until the user picks one
pub fn default_alert() -> Option<Alert> {
    std::env::var("TOCK_DEFAULT_ALERT")
        .ok()
        .map(|s| Alert::parse(&s))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
