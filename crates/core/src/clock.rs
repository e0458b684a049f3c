// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling.
//!
//! Instants are local wall-clock times. Every computation receives the
//! current instant from a [`Clock`]; nothing reads the system time directly.

use chrono::{Duration, NaiveDateTime};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Source of the current instant
pub trait Clock: Clone + Send + Sync + 'static {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system's local time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Manually driven clock for tests.
///
/// Clones share the same underlying instant.
#[derive(Clone, Debug)]
pub struct FakeClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FakeClock {
    /// Create a clock starting at 2026-01-05 00:00 (a Monday).
    pub fn new() -> Self {
        Self::at(NaiveDateTime::default() + Duration::days(20_458))
    }

    /// Create a clock starting at a specific instant.
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Move the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }

    /// Jump to an absolute instant.
    pub fn set(&self, to: NaiveDateTime) {
        *self.now.lock() = to;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

/// The reference instant is earlier than the entity's last recorded
/// transition.
///
/// Reported as a warning; computation proceeds with the later instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("clock skew: reference instant {now} is earlier than last transition at {recorded}")]
pub struct ClockSkew {
    pub recorded: NaiveDateTime,
    pub now: NaiveDateTime,
}

impl ClockSkew {
    /// Returns the skew when `now` precedes `recorded`.
    pub fn detect(recorded: NaiveDateTime, now: NaiveDateTime) -> Option<Self> {
        (now < recorded).then_some(Self { recorded, now })
    }

    /// The instant computation should continue with.
    pub fn effective(&self) -> NaiveDateTime {
        self.recorded
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
