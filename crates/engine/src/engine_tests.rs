// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Duration;
use tock_adapters::FakeNotifier;
use tock_core::test_support::{monday, one_shot};
use tock_core::{FakeClock, InstanceState, TimerState};
use tock_storage::MemoryStore;

fn engine() -> (Engine<MemoryStore, FakeNotifier, FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    let deps = EngineDeps {
        store: MemoryStore::new(),
        notifier: FakeNotifier::new(),
    };
    (
        Engine::new(deps, clock.clone(), EngineConfig::default()),
        clock,
    )
}

#[tokio::test]
async fn poll_reports_alarms_and_timers() {
    let (engine, clock) = engine();
    engine.alarms().add_alarm(one_shot(1, 0, 30)).await.unwrap();
    let timer = engine
        .timers()
        .create(String::new(), Duration::minutes(10))
        .await
        .unwrap();
    engine.timers().start(timer.id).await.unwrap();
    assert_eq!(engine.next_wakeup(), Some(monday(0, 30)));

    clock.advance(Duration::minutes(30));
    let report = engine.poll().await.unwrap();

    assert_eq!(report.alarms.last().map(|t| t.to), Some(InstanceState::Fired));
    assert_eq!(report.timers.len(), 1);
    assert_eq!(report.timers[0].to, TimerState::Expired);
    assert!(engine.poll().await.unwrap().is_empty());
}

#[tokio::test]
async fn recover_marks_missed_alarms() {
    let (engine, clock) = engine();
    engine.alarms().add_alarm(one_shot(1, 7, 0)).await.unwrap();
    clock.set(monday(9, 0));

    let report = engine.recover().await.unwrap();
    assert_eq!(report.alarms.len(), 1);
    assert_eq!(report.alarms[0].to, InstanceState::Missed);
    assert_eq!(engine.next_wakeup(), None);
}

#[tokio::test]
async fn state_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::default().with_state_dir(dir.path());
    let clock = FakeClock::new();

    let first = Engine::new(
        EngineDeps {
            store: MemoryStore::open(config.snapshot_path()).unwrap(),
            notifier: FakeNotifier::new(),
        },
        clock.clone(),
        config.clone(),
    );
    first.alarms().add_alarm(one_shot(1, 7, 0)).await.unwrap();
    drop(first);

    let second = Engine::new(
        EngineDeps {
            store: MemoryStore::open(config.snapshot_path()).unwrap(),
            notifier: FakeNotifier::new(),
        },
        clock,
        config,
    );
    assert_eq!(second.next_wakeup(), None);
    second.recover().await.unwrap();
    assert_eq!(second.next_wakeup(), Some(monday(5, 0)));
    assert_eq!(second.alarms().live_instances().await.unwrap().len(), 1);
}
