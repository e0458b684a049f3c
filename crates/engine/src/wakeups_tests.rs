// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Duration;
use tock_core::{Clock, FakeClock};

#[test]
fn wakeup_lifecycle() {
    let clock = FakeClock::new();
    let mut queue = WakeupQueue::new();
    let id = InstanceId::new(1);

    queue.set(id, clock.now() + Duration::seconds(10));
    assert!(queue.has_wakeups());
    assert_eq!(queue.next_deadline(), Some(clock.now() + Duration::seconds(10)));

    clock.advance(Duration::seconds(5));
    assert!(queue.take_due(clock.now()).is_empty());
    assert!(queue.has_wakeups());

    clock.advance(Duration::seconds(5));
    assert_eq!(queue.take_due(clock.now()), vec![id]);
    assert!(!queue.has_wakeups());
}

#[test]
fn cancel_removes_wakeup() {
    let clock = FakeClock::new();
    let mut queue = WakeupQueue::new();
    queue.set(InstanceId::new(1), clock.now() + Duration::seconds(10));
    queue.cancel(InstanceId::new(1));

    clock.advance(Duration::seconds(15));
    assert!(queue.take_due(clock.now()).is_empty());
}

#[test]
fn setting_again_moves_the_wakeup() {
    let clock = FakeClock::new();
    let mut queue = WakeupQueue::new();
    let id = InstanceId::new(3);
    queue.set(id, clock.now() + Duration::minutes(5));
    queue.set(id, clock.now() + Duration::minutes(1));
    assert_eq!(queue.get(id), Some(clock.now() + Duration::minutes(1)));
}

#[test]
fn due_wakeups_come_back_earliest_first() {
    let clock = FakeClock::new();
    let mut queue = WakeupQueue::new();
    queue.set(InstanceId::new(1), clock.now() + Duration::seconds(20));
    queue.set(InstanceId::new(2), clock.now() + Duration::seconds(5));
    queue.set(InstanceId::new(3), clock.now() + Duration::seconds(60));

    clock.advance(Duration::seconds(30));
    assert_eq!(
        queue.take_due(clock.now()),
        vec![InstanceId::new(2), InstanceId::new(1)]
    );
    assert_eq!(queue.next_deadline(), Some(clock.now() + Duration::seconds(30)));
}

#[yare::parameterized(
    before = { -1, false },
    exactly = { 0, true },
    after = { 1, true },
)]
fn due_at_boundary(offset_secs: i64, due: bool) {
    let clock = FakeClock::new();
    let mut queue = WakeupQueue::new();
    queue.set(InstanceId::new(3), clock.now());

    let taken = queue.take_due(clock.now() + Duration::seconds(offset_secs));
    assert_eq!(!taken.is_empty(), due);
}
