//! Alarm edit specs

use crate::prelude::*;

#[test]
fn changing_time_reschedules() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", "06:00", "--disabled"]).passes();

    let time = hours_from_now(3);
    home.tock()
        .args(&["alarm", "edit", "1", "--time", &time])
        .passes()
        .stdout_has(&format!("Alarm 1: {time} Never on"))
        .stdout_has("Alarm 1 set for");

    let instances = home
        .tock()
        .args(&["-o", "json", "instance", "list"])
        .passes()
        .json();
    assert_eq!(instances.as_array().unwrap().len(), 1);
}

#[test]
fn label_change_keeps_firing_quiet() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", &hours_from_now(3)]).passes();
    home.tock()
        .args(&["alarm", "edit", "1", "--label", "coffee"])
        .passes()
        .stdout_lacks("set for");
    home.tock()
        .args(&["instance", "list"])
        .passes()
        .stdout_has("coffee");
}

#[test]
fn disabling_releases_instance() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", &hours_from_now(3)]).passes();
    home.tock()
        .args(&["alarm", "edit", "1", "--disable"])
        .passes()
        .stdout_has("off");
    home.tock()
        .args(&["instance", "list"])
        .passes()
        .stdout_eq("No pending alarms\n");
}

#[test]
fn repeat_off_then_on_restores_days() {
    let home = Home::empty();
    home.tock()
        .args(&["alarm", "add", "07:00", "--days", "sat,sun"])
        .passes();
    home.tock()
        .args(&["alarm", "edit", "1", "--repeat", "false"])
        .passes()
        .stdout_has("Alarm 1: 07:00 Never");
    home.tock()
        .args(&["alarm", "edit", "1", "--repeat", "true"])
        .passes()
        .stdout_has("Alarm 1: 07:00 Sun, Sat");
}

#[test]
fn toggle_days_edits_pattern() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", "07:00"]).passes();
    home.tock()
        .args(&["alarm", "edit", "1", "--toggle-day", "mon,tue"])
        .passes()
        .stdout_has("Alarm 1: 07:00 Mon, Tue");
}

#[test]
fn chosen_alert_becomes_default() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", "07:00"]).passes();
    home.tock()
        .args(&["alarm", "edit", "1", "--alert", "file:///sounds/birds.ogg"])
        .passes();

    let added = home
        .tock()
        .args(&["-o", "json", "alarm", "add", "08:00"])
        .passes()
        .json();
    assert_eq!(added["alert"]["ringtone"], "file:///sounds/birds.ogg");
}

#[test]
fn silent_alert_round_trips() {
    let home = Home::empty();
    let added = home
        .tock()
        .args(&["-o", "json", "alarm", "add", "07:00", "--alert", "silent"])
        .passes()
        .json();
    assert_eq!(added["alert"], "silent");
}
