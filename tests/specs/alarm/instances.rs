//! Instance action specs
//!
//! Alarms are placed an hour or more ahead so nothing rings mid-test.

use crate::prelude::*;

#[test]
fn alarm_within_two_hours_is_low_notification() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", &hours_from_now(1)]).passes();
    home.tock()
        .args(&["instance", "list"])
        .passes()
        .stdout_has("low_notification");
}

#[test]
fn snoozing_before_ringing_is_rejected() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", &hours_from_now(1)]).passes();
    home.tock()
        .args(&["instance", "snooze", "1"])
        .fails()
        .stderr_has("instance 1 cannot snooze while low_notification");
}

#[test]
fn predismiss_one_shot_switches_alarm_off() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", &hours_from_now(1)]).passes();
    home.tock()
        .args(&["instance", "predismiss", "1"])
        .passes()
        .stdout_eq("Instance 1 predismissed\n");

    let alarm = &home
        .tock()
        .args(&["-o", "json", "alarm", "list"])
        .passes()
        .json()[0];
    assert_eq!(alarm["enabled"], false);
    assert!(alarm.get("instance").is_none());
}

#[test]
fn predismiss_repeating_moves_to_next_day() {
    let home = Home::empty();
    home.tock()
        .args(&[
            "alarm",
            "add",
            &hours_from_now(1),
            "--days",
            "sun,mon,tue,wed,thu,fri,sat",
        ])
        .passes();
    home.tock().args(&["instance", "predismiss", "1"]).passes();

    let instances = home
        .tock()
        .args(&["-o", "json", "instance", "list"])
        .passes()
        .json();
    let instances = instances.as_array().unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0]["id"], 2);
    assert_eq!(instances[0]["state"], "scheduled");
}

#[test]
fn dismissing_a_pending_instance_is_rejected() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", &hours_from_now(3)]).passes();
    home.tock()
        .args(&["instance", "dismiss", "1"])
        .fails()
        .stderr_has("cannot dismiss while scheduled");
}

#[test]
fn detect_missed_keeps_future_alarms() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", &hours_from_now(3)]).passes();
    home.tock()
        .args(&["detect-missed"])
        .passes()
        .stdout_eq("Nothing due\n");
    home.tock()
        .args(&["instance", "list"])
        .passes()
        .stdout_has("scheduled");
}
