// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration resolved from the environment

use crate::env;
use chrono::{Duration, Weekday};
use std::path::PathBuf;
use thiserror::Error;
use tock_core::{Alert, InstanceTimings};

/// Errors resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory (set TOCK_STATE_DIR or HOME)")]
    NoStateDir,
}

/// Tunables for alarm and timer behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Root state directory (e.g. ~/.local/state/tock)
    pub state_dir: PathBuf,
    pub snooze: Duration,
    pub timings: InstanceTimings,
    /// How long an expired timer sounds before it counts as missed
    pub timer_missed: Duration,
    pub first_day_of_week: Weekday,
    /// Alert for new alarms until the user picks a ringtone
    pub default_alert: Alert,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from("."),
            snooze: Duration::minutes(10),
            timings: InstanceTimings::default(),
            timer_missed: Duration::seconds(60),
            first_day_of_week: Weekday::Sun,
            default_alert: Alert::default(),
        }
    }
}

impl EngineConfig {
    /// Build from `TOCK_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let timings = InstanceTimings {
            low_notification: env::low_notification()
                .unwrap_or(defaults.timings.low_notification),
            high_notification: env::high_notification()
                .unwrap_or(defaults.timings.high_notification),
            missed_grace: env::missed_grace().unwrap_or(defaults.timings.missed_grace),
            auto_silence: env::auto_silence().unwrap_or(defaults.timings.auto_silence),
        };
        Ok(Self {
            state_dir: env::state_dir().ok_or(ConfigError::NoStateDir)?,
            snooze: env::snooze().unwrap_or(defaults.snooze),
            timings,
            timer_missed: env::timer_missed().unwrap_or(defaults.timer_missed),
            first_day_of_week: env::first_day_of_week().unwrap_or(defaults.first_day_of_week),
            default_alert: env::default_alert().unwrap_or(defaults.default_alert),
        })
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    /// Store snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.state_dir.join("tock.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join("tock.log")
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
