// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notifier for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Notifier, NotifyError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tock_core::{InstanceState, TimerState, TimerTransition, Transition};

/// Recorded delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Instance(Transition),
    Timer(TimerTransition),
}

#[derive(Default)]
struct FakeNotifierState {
    calls: Vec<NotifierCall>,
    fail: bool,
}

/// Fake notifier that records every transition
#[derive(Clone, Default)]
pub struct FakeNotifier {
    inner: Arc<Mutex<FakeNotifierState>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded deliveries
    pub fn calls(&self) -> Vec<NotifierCall> {
        self.inner.lock().calls.clone()
    }

    /// Instance transitions as `(from, to)` pairs, in delivery order
    pub fn instance_states(&self) -> Vec<(InstanceState, InstanceState)> {
        self.instance_transitions()
            .iter()
            .map(|t| (t.from, t.to))
            .collect()
    }

    pub fn instance_transitions(&self) -> Vec<Transition> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                NotifierCall::Instance(t) => Some(t.clone()),
                NotifierCall::Timer(_) => None,
            })
            .collect()
    }

    /// Timer transitions as `(from, to)` pairs, in delivery order
    pub fn timer_states(&self) -> Vec<(TimerState, TimerState)> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                NotifierCall::Timer(t) => Some((t.from, t.to)),
                NotifierCall::Instance(_) => None,
            })
            .collect()
    }

    /// Make every later delivery fail (still recorded).
    pub fn set_failing(&self, fail: bool) {
        self.inner.lock().fail = fail;
    }

    pub fn clear(&self) {
        self.inner.lock().calls.clear();
    }

    fn record(&self, call: NotifierCall) -> Result<(), NotifyError> {
        let mut inner = self.inner.lock();
        inner.calls.push(call);
        if inner.fail {
            return Err(NotifyError::DeliveryFailed("fake failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn instance_changed(&self, transition: &Transition) -> Result<(), NotifyError> {
        self.record(NotifierCall::Instance(transition.clone()))
    }

    async fn timer_changed(&self, transition: &TimerTransition) -> Result<(), NotifyError> {
        self.record(NotifierCall::Timer(transition.clone()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
