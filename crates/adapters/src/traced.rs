// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced notifier wrapper for consistent observability

use crate::notify::{Notifier, NotifyError};
use async_trait::async_trait;
use tock_core::{TimerTransition, Transition};

/// Wrapper that logs every delivery made through any Notifier
#[derive(Clone)]
pub struct TracedNotifier<N> {
    inner: N,
}

impl<N> TracedNotifier<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }
}

#[async_trait]
impl<N: Notifier> Notifier for TracedNotifier<N> {
    async fn instance_changed(&self, transition: &Transition) -> Result<(), NotifyError> {
        let span = tracing::info_span!(
            "notify.instance",
            instance_id = %transition.instance_id,
            alarm_id = %transition.alarm_id,
        );
        let result = self.inner.instance_changed(transition).await;
        span.in_scope(|| match &result {
            Ok(()) => tracing::info!(
                from = %transition.from,
                to = %transition.to,
                at = %transition.at,
                "instance transition"
            ),
            Err(e) => tracing::error!(error = %e, "instance delivery failed"),
        });
        result
    }

    async fn timer_changed(&self, transition: &TimerTransition) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notify.timer", timer_id = %transition.timer_id);
        let result = self.inner.timer_changed(transition).await;
        span.in_scope(|| match &result {
            Ok(()) => tracing::info!(
                from = %transition.from,
                to = %transition.to,
                at = %transition.at,
                "timer transition"
            ),
            Err(e) => tracing::error!(error = %e, "timer delivery failed"),
        });
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
