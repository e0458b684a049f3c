// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{jan, monday};
use chrono::Weekday::{Fri, Mon, Sat, Sun, Wed};
use proptest::prelude::*;

fn seven() -> TimeOfDay {
    TimeOfDay::new(7, 0).unwrap()
}

#[test]
fn time_of_day_rejects_out_of_range_values() {
    assert_eq!(TimeOfDay::new(24, 0), Err(TimeOfDayError::Hour(24)));
    assert_eq!(TimeOfDay::new(7, 60), Err(TimeOfDayError::Minute(60)));
    assert!(TimeOfDay::new(23, 59).is_ok());
}

#[yare::parameterized(
    padded     = { "07:05", 7, 5 },
    unpadded   = { "7:5",   7, 5 },
    midnight   = { "00:00", 0, 0 },
    whitespace = { " 23:59 ", 23, 59 },
)]
fn time_of_day_parses(input: &str, hour: u32, minute: u32) {
    let time: TimeOfDay = input.parse().unwrap();
    assert_eq!((time.hour(), time.minute()), (hour, minute));
}

#[yare::parameterized(
    no_colon   = { "0700" },
    letters    = { "ab:cd" },
    bad_hour   = { "25:00" },
    bad_minute = { "10:75" },
)]
fn time_of_day_rejects(input: &str) {
    assert!(input.parse::<TimeOfDay>().is_err());
}

#[test]
fn time_of_day_displays_padded() {
    assert_eq!(TimeOfDay::new(7, 5).unwrap().to_string(), "07:05");
}

#[test]
fn time_of_day_serde_rejects_invalid_hour() {
    let parsed: TimeOfDay = serde_json::from_str(r#"{"hour":7,"minute":30}"#).unwrap();
    assert_eq!(parsed, TimeOfDay::new(7, 30).unwrap());
    assert!(serde_json::from_str::<TimeOfDay>(r#"{"hour":31,"minute":0}"#).is_err());
}

#[test]
fn disabled_alarm_never_triggers() {
    assert_eq!(
        next_trigger(seven(), WeekPattern::EVERY_DAY, false, monday(6, 0)),
        None
    );
}

#[test]
fn one_shot_later_today_fires_today() {
    assert_eq!(
        next_trigger(seven(), WeekPattern::NONE, true, monday(6, 0)),
        Some(monday(7, 0))
    );
}

#[test]
fn one_shot_already_passed_fires_tomorrow() {
    // Monday 08:00 -> Tuesday 07:00
    assert_eq!(
        next_trigger(seven(), WeekPattern::NONE, true, monday(8, 0)),
        Some(jan(6, 7, 0))
    );
}

#[test]
fn exact_boundary_counts_as_not_yet_passed() {
    assert_eq!(
        next_trigger(seven(), WeekPattern::NONE, true, monday(7, 0)),
        Some(monday(7, 0))
    );
    assert_eq!(
        next_trigger(seven(), WeekPattern::from_days([Mon]), true, monday(7, 0)),
        Some(monday(7, 0))
    );
}

#[test]
fn repeating_fires_today_when_not_yet_passed() {
    let pattern = WeekPattern::from_days([Mon, Wed, Fri]);
    assert_eq!(
        next_trigger(seven(), pattern, true, monday(6, 0)),
        Some(monday(7, 0))
    );
}

#[test]
fn repeating_skips_to_next_set_day_once_passed() {
    let pattern = WeekPattern::from_days([Mon, Wed, Fri]);
    // Monday 08:00 -> Wednesday 07:00
    assert_eq!(
        next_trigger(seven(), pattern, true, monday(8, 0)),
        Some(jan(7, 7, 0))
    );
}

#[test]
fn single_day_pattern_recurs_weekly() {
    let pattern = WeekPattern::from_days([Mon]);
    // Passed on Monday -> next Monday.
    assert_eq!(
        next_trigger(seven(), pattern, true, monday(8, 0)),
        Some(jan(12, 7, 0))
    );
}

#[test]
fn pattern_wraps_across_week_end() {
    let pattern = WeekPattern::from_days([Sun]);
    // Saturday 2026-01-10 -> Sunday 2026-01-11
    assert_eq!(
        next_trigger(seven(), pattern, true, jan(10, 9, 0)),
        Some(jan(11, 7, 0))
    );
    let pattern = WeekPattern::from_days([Sat]);
    assert_eq!(
        next_trigger(seven(), pattern, true, jan(11, 9, 0)),
        Some(jan(17, 7, 0))
    );
}

#[test]
fn trigger_after_skips_the_consumed_firing() {
    let pattern = WeekPattern::from_days([Mon, Wed]);
    assert_eq!(
        next_trigger_after(seven(), pattern, monday(7, 0)),
        Some(jan(7, 7, 0))
    );
    assert_eq!(
        next_trigger_after(seven(), WeekPattern::EVERY_DAY, monday(6, 59)),
        Some(monday(7, 0))
    );
}

#[test]
fn seconds_in_reference_are_respected() {
    let now = monday(7, 0) + Duration::seconds(30);
    assert_eq!(
        next_trigger(seven(), WeekPattern::NONE, true, now),
        Some(jan(6, 7, 0))
    );
}

fn weekdays() -> impl Strategy<Value = WeekPattern> {
    (1_u8..=0x7f).prop_map(|bits| WeekPattern::from_bits(bits).unwrap_or(WeekPattern::EVERY_DAY))
}

fn instants() -> impl Strategy<Value = NaiveDateTime> {
    (0_i64..(60 * 24 * 28)).prop_map(|minutes| monday(0, 0) + Duration::minutes(minutes))
}

proptest! {
    #[test]
    fn repeating_trigger_is_within_one_week(
        hour in 0_u32..24,
        minute in 0_u32..60,
        pattern in weekdays(),
        now in instants(),
    ) {
        let time = TimeOfDay::new(hour, minute).unwrap();
        let next = next_trigger(time, pattern, true, now).unwrap();
        prop_assert!(next >= now);
        prop_assert!(next <= now + Duration::days(7));
        prop_assert!(pattern.is_set(next.weekday()));
        prop_assert_eq!(next.time(), time.on(now).time());
    }

    #[test]
    fn one_shot_trigger_is_today_or_tomorrow(
        hour in 0_u32..24,
        minute in 0_u32..60,
        now in instants(),
    ) {
        let time = TimeOfDay::new(hour, minute).unwrap();
        let next = next_trigger(time, WeekPattern::NONE, true, now).unwrap();
        let today = time.on(now);
        if today >= now {
            prop_assert_eq!(next, today);
        } else {
            prop_assert_eq!(next, today + Duration::days(1));
        }
    }

    #[test]
    fn trigger_after_is_strictly_later(
        hour in 0_u32..24,
        minute in 0_u32..60,
        pattern in weekdays(),
        now in instants(),
    ) {
        let time = TimeOfDay::new(hour, minute).unwrap();
        let next = next_trigger_after(time, pattern, now).unwrap();
        prop_assert!(next > now);
    }
}

