// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op notifier.

use super::{Notifier, NotifyError};
use async_trait::async_trait;
use tock_core::{TimerTransition, Transition};

/// Notifier that discards every transition.
///
/// Used by hosts that only read state back from the store.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotifier;

impl NoOpNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn instance_changed(&self, _transition: &Transition) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn timer_changed(&self, _transition: &TimerTransition) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
