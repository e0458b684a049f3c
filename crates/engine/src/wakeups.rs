// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending wakeups for alarm instances

use chrono::NaiveDateTime;
use std::collections::HashMap;
use tock_core::InstanceId;

/// Next time-driven transition per instance.
///
/// Hosts arm an OS timer for [`WakeupQueue::next_deadline`] and call the
/// scheduler's `tick` when it elapses.
#[derive(Debug, Default)]
pub struct WakeupQueue {
    wakeups: HashMap<InstanceId, NaiveDateTime>,
}

impl WakeupQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or move) the wakeup for an instance
    pub fn set(&mut self, id: InstanceId, at: NaiveDateTime) {
        self.wakeups.insert(id, at);
    }

    pub fn cancel(&mut self, id: InstanceId) {
        self.wakeups.remove(&id);
    }

    /// Remove and return every wakeup due at `now`, earliest first
    pub fn take_due(&mut self, now: NaiveDateTime) -> Vec<InstanceId> {
        let mut due: Vec<_> = self
            .wakeups
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(id, at)| (*at, *id))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.wakeups.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    pub fn get(&self, id: InstanceId) -> Option<NaiveDateTime> {
        self.wakeups.get(&id).copied()
    }

    /// Earliest pending wakeup
    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        self.wakeups.values().min().copied()
    }

    pub fn has_wakeups(&self) -> bool {
        !self.wakeups.is_empty()
    }
}

#[cfg(test)]
#[path = "wakeups_tests.rs"]
mod tests;
