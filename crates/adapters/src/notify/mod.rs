// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transition notifiers

mod noop;

pub use noop::NoOpNotifier;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifier, NotifierCall};

use async_trait::async_trait;
use thiserror::Error;
use tock_core::{TimerTransition, Transition};

/// Errors from notifier delivery
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Receives every state transition the engine applies.
///
/// Implementations decide how (and whether) to present them; the engine
/// treats a failure as non-fatal.
#[async_trait]
pub trait Notifier: Clone + Send + Sync + 'static {
    async fn instance_changed(&self, transition: &Transition) -> Result<(), NotifyError>;

    async fn timer_changed(&self, transition: &TimerTransition) -> Result<(), NotifyError>;
}
