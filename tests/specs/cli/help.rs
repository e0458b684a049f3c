//! Help output specs

use crate::prelude::*;

#[test]
fn no_arguments_prints_help() {
    let home = Home::empty();
    home.tock()
        .passes()
        .stdout_has("Usage:")
        .stdout_has("alarm")
        .stdout_has("timer");
}

#[test]
fn alarm_help_lists_subcommands() {
    let home = Home::empty();
    home.tock()
        .args(&["alarm", "--help"])
        .passes()
        .stdout_has("add")
        .stdout_has("edit")
        .stdout_has("undo");
}

#[test]
fn empty_state_lists_nothing() {
    let home = Home::empty();
    home.tock().args(&["alarm", "list"]).passes().stdout_eq("No alarms\n");
    home.tock().args(&["timer", "list"]).passes().stdout_eq("No timers\n");
    home.tock()
        .args(&["instance", "list"])
        .passes()
        .stdout_eq("No pending alarms\n");
}

#[test]
fn tick_on_empty_state_reports_nothing_due() {
    let home = Home::empty();
    home.tock().args(&["tick"]).passes().stdout_eq("Nothing due\n");
    home.tock()
        .args(&["detect-missed"])
        .passes()
        .stdout_eq("Nothing due\n");
}
