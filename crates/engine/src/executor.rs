// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::wakeups::WakeupQueue;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::sync::Arc;
use tock_adapters::Notifier;
use tock_core::Effect;

/// Executes effects using the configured notifier and wakeup queue.
///
/// Delivery failures are logged and never abort the request that produced
/// the effect.
pub struct Executor<N> {
    notifier: N,
    wakeups: Arc<Mutex<WakeupQueue>>,
}

impl<N: Notifier> Executor<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            wakeups: Arc::new(Mutex::new(WakeupQueue::new())),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Shared handle to the wakeup queue (for the host's timer loop)
    pub fn wakeups(&self) -> Arc<Mutex<WakeupQueue>> {
        Arc::clone(&self.wakeups)
    }

    pub fn next_wakeup(&self) -> Option<NaiveDateTime> {
        self.wakeups.lock().next_deadline()
    }

    /// Execute effects in order
    pub async fn execute_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.execute(effect).await;
        }
    }

    /// Execute a single effect with tracing
    pub async fn execute(&self, effect: Effect) {
        let span = tracing::debug_span!("effect", effect = effect.name());
        span.in_scope(|| tracing::debug!(fields = ?effect.fields(), "executing"));

        match effect {
            Effect::Notify { transition } => {
                if let Err(e) = self.notifier.instance_changed(&transition).await {
                    tracing::warn!(
                        instance_id = %transition.instance_id,
                        to = %transition.to,
                        error = %e,
                        "instance notification failed"
                    );
                }
            }
            Effect::NotifyTimer { transition } => {
                if let Err(e) = self.notifier.timer_changed(&transition).await {
                    tracing::warn!(
                        timer_id = %transition.timer_id,
                        to = %transition.to,
                        error = %e,
                        "timer notification failed"
                    );
                }
            }
            Effect::ScheduleWakeup { instance_id, at } => {
                self.wakeups.lock().set(instance_id, at);
            }
            Effect::CancelWakeup { instance_id } => {
                self.wakeups.lock().cancel(instance_id);
            }
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
