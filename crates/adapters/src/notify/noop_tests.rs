// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tock_core::test_support::monday;
use tock_core::{AlarmId, InstanceId, InstanceState};

#[tokio::test]
async fn noop_accepts_transitions() {
    let notifier = NoOpNotifier::new();
    let transition = Transition {
        instance_id: InstanceId::new(1),
        alarm_id: AlarmId::new(1),
        from: InstanceState::Scheduled,
        to: InstanceState::LowNotification,
        at: monday(5, 0),
    };
    assert!(notifier.instance_changed(&transition).await.is_ok());
}

#[test]
fn noop_default() {
    let notifier = NoOpNotifier::default();
    assert!(std::mem::size_of_val(&notifier) == 0);
}
