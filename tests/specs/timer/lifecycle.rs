//! Timer specs

use crate::prelude::*;

#[test]
fn create_starts_in_reset() {
    let home = Home::empty();
    home.tock()
        .args(&["timer", "create", "5m", "--label", "tea"])
        .passes()
        .stdout_eq("Timer 1 reset 5:00\n");
    home.tock()
        .args(&["timer", "list"])
        .passes()
        .stdout_has("tea")
        .stdout_has("reset");
}

#[test]
fn start_pause_reset() {
    let home = Home::empty();
    home.tock().args(&["timer", "create", "10m"]).passes();
    home.tock()
        .args(&["timer", "start", "1"])
        .passes()
        .stdout_has("Timer 1 running");
    home.tock()
        .args(&["timer", "pause", "1"])
        .passes()
        .stdout_has("Timer 1 paused");
    home.tock()
        .args(&["timer", "reset", "1"])
        .passes()
        .stdout_eq("Timer 1 reset 10:00\n");
}

#[test]
fn add_minute_extends_running_timer() {
    let home = Home::empty();
    home.tock().args(&["timer", "create", "5m", "--start"]).passes();
    let timer = home
        .tock()
        .args(&["-o", "json", "timer", "add-minute", "1"])
        .passes()
        .json();
    assert_eq!(timer["total_ms"], 360_000);
    assert_eq!(timer["state"], "running");
}

#[test]
fn add_minute_while_reset_is_rejected() {
    let home = Home::empty();
    home.tock().args(&["timer", "create", "5m"]).passes();
    home.tock()
        .args(&["timer", "add-minute", "1"])
        .fails()
        .stderr_has("timer 1 cannot add a minute while reset");
}

#[test]
fn short_timer_expires_on_tick() {
    let home = Home::empty();
    home.tock().args(&["timer", "create", "1s", "--start"]).passes();
    std::thread::sleep(std::time::Duration::from_millis(1200));
    home.tock()
        .args(&["tick"])
        .passes()
        .stdout_has("timer 1: running -> expired");
    home.tock()
        .args(&["timer", "list"])
        .passes()
        .stdout_has("expired");
}

#[test]
fn delete_removes_timer() {
    let home = Home::empty();
    home.tock().args(&["timer", "create", "90s"]).passes();
    home.tock()
        .args(&["timer", "delete", "1"])
        .passes()
        .stdout_eq("Deleted timer 1\n");
    home.tock().args(&["timer", "list"]).passes().stdout_eq("No timers\n");
    home.tock()
        .args(&["timer", "start", "1"])
        .fails()
        .stderr_has("timer 1 not found");
}
