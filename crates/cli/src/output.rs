// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Serialize;
use tock_core::{format_countdown, format_span, AlarmInstance, Timer, TimerState};

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Weekday and clock time, e.g. `"Mon 07:00"`.
pub fn format_instant(at: NaiveDateTime) -> String {
    at.format("%a %H:%M").to_string()
}

/// `"in 7h"` for a future instant, `"now"` otherwise.
pub fn format_fires_in(at: NaiveDateTime, now: NaiveDateTime) -> String {
    if at <= now {
        "now".to_string()
    } else {
        format!("in {}", format_span(at - now))
    }
}

/// Line telling the user when an alarm will next ring.
pub fn fire_message(alarm_id: i64, at: NaiveDateTime, now: NaiveDateTime) -> String {
    format!(
        "Alarm {} set for {} ({})",
        alarm_id,
        format_instant(at),
        format_fires_in(at, now)
    )
}

pub fn enabled_cell(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// When an instance will next make noise: the snooze end while snoozed.
pub fn instance_due(instance: &AlarmInstance) -> NaiveDateTime {
    instance.snoozed_until.unwrap_or(instance.fire_at)
}

/// Countdown text for a timer; expired and missed timers count up with a
/// leading `-`.
pub fn timer_reading(timer: &Timer, now: NaiveDateTime) -> String {
    match timer.state {
        TimerState::Expired | TimerState::Missed => format_countdown(-timer.overdue_ms(now)),
        _ => format_countdown(timer.remaining_ms(now)),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
