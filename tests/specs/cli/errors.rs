//! CLI error handling specs
//!
//! Verify error messages for invalid commands and arguments.

use crate::prelude::*;

#[test]
fn unknown_alarm_is_reported() {
    let home = Home::empty();
    home.tock()
        .args(&["alarm", "delete", "9"])
        .fails()
        .stderr_has("Error: alarm 9 not found");
}

#[test]
fn unknown_instance_is_reported() {
    let home = Home::empty();
    home.tock()
        .args(&["instance", "dismiss", "4"])
        .fails()
        .stderr_has("instance 4 not found");
}

#[test]
fn bad_time_is_rejected() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", "25:00"]).fails();
    home.tock().args(&["alarm", "add", "7.30"]).fails();
}

#[test]
fn bad_timer_length_is_rejected() {
    let home = Home::empty();
    home.tock()
        .args(&["timer", "create", "5d"])
        .fails()
        .stderr_has("unknown unit 'd'");
    home.tock()
        .args(&["timer", "create", "0"])
        .fails()
        .stderr_has("must be positive");
}

#[test]
fn edit_without_changes_fails() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", "07:00"]).passes();
    home.tock()
        .args(&["alarm", "edit", "1"])
        .fails()
        .stderr_has("nothing to change for alarm 1");
}

#[test]
fn undo_without_delete_fails() {
    let home = Home::empty();
    home.tock()
        .args(&["alarm", "undo"])
        .fails()
        .stderr_has("no deleted alarm to restore");
}
