//! Alarm create/list/delete/undo specs

use crate::prelude::*;

#[test]
fn add_reports_alarm_and_next_firing() {
    let home = Home::empty();
    home.tock()
        .args(&["alarm", "add", "07:30", "--days", "mon,wed,fri", "--label", "gym"])
        .passes()
        .stdout_has("Alarm 1: 07:30 Mon, Wed, Fri on")
        .stdout_has("Alarm 1 set for");
}

#[test]
fn disabled_alarm_has_no_firing() {
    let home = Home::empty();
    home.tock()
        .args(&["alarm", "add", "07:30", "--disabled"])
        .passes()
        .stdout_eq("Alarm 1: 07:30 Never off\n");
    home.tock()
        .args(&["instance", "list"])
        .passes()
        .stdout_eq("No pending alarms\n");
}

#[test]
fn list_shows_alarms_with_state() {
    let home = Home::empty();
    let time = hours_from_now(3);
    home.tock().args(&["alarm", "add", &time, "--label", "wake"]).passes();
    home.tock().args(&["alarm", "add", "06:00", "--disabled"]).passes();

    home.tock()
        .args(&["alarm", "list"])
        .passes()
        .stdout_has("ID")
        .stdout_has(&time)
        .stdout_has("wake")
        .stdout_has("scheduled")
        .stdout_has("off");
}

#[test]
fn state_persists_between_runs() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", "08:15"]).passes();
    home.tock().args(&["alarm", "add", "09:45"]).passes();

    let list = home.tock().args(&["-o", "json", "alarm", "list"]).passes().json();
    let alarms = list.as_array().unwrap();
    assert_eq!(alarms.len(), 2);
    assert_eq!(alarms[0]["id"], 1);
    assert_eq!(alarms[1]["id"], 2);
    assert!(home.state_path().join("tock.json").exists());
}

#[test]
fn delete_then_undo_restores_alarm() {
    let home = Home::empty();
    let time = hours_from_now(2);
    home.tock().args(&["alarm", "add", &time]).passes();

    home.tock()
        .args(&["alarm", "delete", "1"])
        .passes()
        .stdout_eq(&format!("Deleted alarm 1 ({time})\n"));
    home.tock().args(&["alarm", "list"]).passes().stdout_eq("No alarms\n");

    home.tock()
        .args(&["alarm", "undo"])
        .passes()
        .stdout_has(&format!("Alarm 1: {time}"));
    home.tock()
        .args(&["instance", "list"])
        .passes()
        .stdout_has(&time);

    // Only the most recent deletion can be restored, once
    home.tock().args(&["alarm", "undo"]).fails();
}

#[test]
fn deleting_an_alarm_drops_its_instance() {
    let home = Home::empty();
    home.tock().args(&["alarm", "add", &hours_from_now(4)]).passes();
    home.tock().args(&["alarm", "delete", "1"]).passes();
    home.tock()
        .args(&["instance", "list"])
        .passes()
        .stdout_eq("No pending alarms\n");
}

#[test]
fn json_add_includes_instance() {
    let home = Home::empty();
    let added = home
        .tock()
        .args(&["-o", "json", "alarm", "add", &hours_from_now(5)])
        .passes()
        .json();
    assert_eq!(added["id"], 1);
    assert_eq!(added["enabled"], true);
    assert_eq!(added["instance"]["alarm_id"], 1);
    assert_eq!(added["instance"]["state"], "scheduled");
}
