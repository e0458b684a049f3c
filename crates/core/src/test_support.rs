// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::alarm::Alarm;
use crate::clock::{Clock, FakeClock};
use crate::id::{AlarmId, InstanceId};
use crate::instance::{AlarmInstance, InstanceState};
use chrono::{Duration, NaiveDateTime, Weekday};

// ── Instants ────────────────────────────────────────────────────────────────

/// Monday 2026-01-05 at `hour:minute`.
pub fn monday(hour: i64, minute: i64) -> NaiveDateTime {
    FakeClock::new().now() + Duration::hours(hour) + Duration::minutes(minute)
}

/// 2026-01-`day` at `hour:minute`. January 5th is a Monday.
pub fn jan(day: i64, hour: i64, minute: i64) -> NaiveDateTime {
    monday(hour, minute) + Duration::days(day - 5)
}

// ── Alarm factories ─────────────────────────────────────────────────────────

/// Enabled one-shot alarm at `hour:minute`.
pub fn one_shot(id: i64, hour: u32, minute: u32) -> Alarm {
    Alarm::builder().id(id).time(hour, minute).build()
}

/// Enabled alarm repeating on Monday, Wednesday and Friday.
pub fn weekday_alarm(id: i64, hour: u32, minute: u32) -> Alarm {
    Alarm::builder()
        .id(id)
        .time(hour, minute)
        .days([Weekday::Mon, Weekday::Wed, Weekday::Fri])
        .build()
}

/// Instance of `alarm` in `state`, firing at `fire_at`.
pub fn instance_in(
    id: i64,
    alarm: &Alarm,
    fire_at: NaiveDateTime,
    state: InstanceState,
) -> AlarmInstance {
    let mut instance =
        AlarmInstance::scheduled(InstanceId::new(id), alarm, fire_at, fire_at - Duration::days(1));
    instance.state = state;
    if state == InstanceState::Fired {
        instance.rang_at = Some(fire_at);
    }
    instance
}

/// Alarm id shortcut.
pub fn alarm_id(id: i64) -> AlarmId {
    AlarmId::new(id)
}
