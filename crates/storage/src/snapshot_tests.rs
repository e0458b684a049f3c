// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Duration;
use std::io::Write;
use tempfile::tempdir;
use tock_core::test_support::{instance_in, monday, weekday_alarm};
use tock_core::{InstanceState, Timer};

fn create_test_state() -> StoreState {
    let mut state = StoreState::default();
    let alarm = state.insert_alarm(weekday_alarm(-1, 7, 0));
    state.insert_instance(instance_in(-1, &alarm, monday(7, 0), InstanceState::Snoozed));
    state.insert_timer(Timer::new("tea", Duration::minutes(5)).unwrap());
    state
}

#[test]
fn save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tock.json");
    let state = create_test_state();

    Snapshot::new(state.clone()).save(&path).unwrap();
    assert!(path.exists());

    let loaded = Snapshot::load(&path).unwrap().unwrap();
    assert_eq!(loaded.version, CURRENT_SNAPSHOT_VERSION);
    assert_eq!(loaded.state, state);
}

#[test]
fn load_nonexistent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nonexistent.json");
    assert!(Snapshot::load(&path).unwrap().is_none());
}

#[test]
fn atomic_write_leaves_no_tmp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("tock.json");

    Snapshot::new(create_test_state()).save(&path).unwrap();
    assert!(!path.with_extension("tmp").exists());
    assert!(path.exists());
}

#[test]
fn saved_ids_survive_reload_and_keep_counting() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tock.json");
    Snapshot::new(create_test_state()).save(&path).unwrap();

    let mut state = Snapshot::load(&path).unwrap().unwrap().state;
    let next = state.insert_alarm(weekday_alarm(-1, 8, 0));
    assert_eq!(next.id.get(), 2);
}

#[test]
fn corrupt_snapshot_returns_none_and_creates_bak() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tock.json");

    let mut f = File::create(&path).unwrap();
    f.write_all(b"\xe5\x03\x01binary-garbage").unwrap();
    drop(f);

    assert!(Snapshot::load(&path).unwrap().is_none());
    assert!(!path.exists());
    assert!(path.with_extension("bak").exists());
}

#[test]
fn corrupt_snapshots_rotate_bak_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tock.json");

    for i in 1..=4u8 {
        let mut f = File::create(&path).unwrap();
        f.write_all(&[i; 4]).unwrap();
        drop(f);
        assert!(Snapshot::load(&path).unwrap().is_none());
    }

    assert_eq!(fs::read(path.with_extension("bak")).unwrap(), vec![4u8; 4]);
    assert_eq!(fs::read(path.with_extension("bak.2")).unwrap(), vec![3u8; 4]);
    assert_eq!(fs::read(path.with_extension("bak.3")).unwrap(), vec![2u8; 4]);
    assert!(!path.with_extension("bak.4").exists());
}

#[test]
fn newer_version_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tock.json");
    fs::write(&path, r#"{"version": 99, "state": {}}"#).unwrap();

    let err = Snapshot::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::TooNew { found: 99, .. }));
    assert!(path.exists());
}
