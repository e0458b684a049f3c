// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

const VARS: &[&str] = &[
    "TOCK_STATE_DIR",
    "XDG_STATE_HOME",
    "TOCK_SNOOZE_MINUTES",
    "TOCK_TIMER_MISSED_SECS",
    "TOCK_FIRST_DAY_OF_WEEK",
    "TOCK_DEFAULT_ALERT",
];

fn clear() {
    for name in VARS {
        std::env::remove_var(name);
    }
}

#[test]
#[serial(env)]
fn state_dir_prefers_explicit_override() {
    clear();
    std::env::set_var("XDG_STATE_HOME", "/xdg");
    std::env::set_var("TOCK_STATE_DIR", "/explicit");
    assert_eq!(state_dir(), Some(PathBuf::from("/explicit")));
    clear();
}

#[test]
#[serial(env)]
fn state_dir_falls_back_to_xdg() {
    clear();
    std::env::set_var("XDG_STATE_HOME", "/xdg");
    assert_eq!(state_dir(), Some(PathBuf::from("/xdg/tock")));
    clear();
}

#[test]
#[serial(env)]
fn snooze_minutes() {
    let cases = [
        ("10", Some(10)),
        (" 5 ", Some(5)),
        ("0", None),
        ("-3", None),
        ("soon", None),
        ("", None),
    ];
    for (value, expected) in cases {
        clear();
        std::env::set_var("TOCK_SNOOZE_MINUTES", value);
        assert_eq!(snooze(), expected.map(Duration::minutes), "value {value:?}");
    }
    clear();
}

#[test]
#[serial(env)]
fn timer_missed_is_in_seconds() {
    clear();
    std::env::set_var("TOCK_TIMER_MISSED_SECS", "90");
    assert_eq!(timer_missed(), Some(Duration::seconds(90)));
    clear();
}

#[test]
#[serial(env)]
fn first_day() {
    let cases = [
        ("sun", Some(Weekday::Sun)),
        ("Monday", Some(Weekday::Mon)),
        ("sat", Some(Weekday::Sat)),
        ("someday", None),
    ];
    for (value, expected) in cases {
        clear();
        std::env::set_var("TOCK_FIRST_DAY_OF_WEEK", value);
        assert_eq!(first_day_of_week(), expected, "value {value:?}");
    }
    clear();
}

#[test]
#[serial(env)]
fn default_alert_accepts_silent() {
    clear();
    assert_eq!(default_alert(), None);
    std::env::set_var("TOCK_DEFAULT_ALERT", "silent");
    assert_eq!(default_alert(), Some(Alert::Silent));
    clear();
}
