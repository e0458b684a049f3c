// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine that ties alarms and timers to one store, notifier and clock

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::executor::Executor;
use crate::scheduler::AlarmScheduler;
use crate::timers::TimerService;
use chrono::NaiveDateTime;
use std::sync::Arc;
use tock_adapters::Notifier;
use tock_core::{Clock, TimerTransition, Transition};
use tock_storage::Store;

/// Engine adapter dependencies
pub struct EngineDeps<S, N> {
    pub store: S,
    pub notifier: N,
}

/// Transitions produced by one [`Engine::poll`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub alarms: Vec<Transition>,
    pub timers: Vec<TimerTransition>,
}

impl PollReport {
    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty() && self.timers.is_empty()
    }
}

/// Alarm scheduler and timer service sharing one executor
pub struct Engine<S, N, C> {
    alarms: AlarmScheduler<S, N, C>,
    timers: TimerService<S, N, C>,
    executor: Arc<Executor<N>>,
    config: EngineConfig,
}

impl<S, N, C> Engine<S, N, C>
where
    S: Store,
    N: Notifier,
    C: Clock,
{
    pub fn new(deps: EngineDeps<S, N>, clock: C, config: EngineConfig) -> Self {
        let executor = Arc::new(Executor::new(deps.notifier));
        Self {
            alarms: AlarmScheduler::new(
                deps.store.clone(),
                Arc::clone(&executor),
                clock.clone(),
                &config,
            ),
            timers: TimerService::new(deps.store, Arc::clone(&executor), clock, &config),
            executor,
            config,
        }
    }

    pub fn alarms(&self) -> &AlarmScheduler<S, N, C> {
        &self.alarms
    }

    pub fn timers(&self) -> &TimerService<S, N, C> {
        &self.timers
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        self.alarms.clock()
    }

    /// Earliest armed instance wakeup, for the host's OS timer.
    pub fn next_wakeup(&self) -> Option<NaiveDateTime> {
        self.executor.next_wakeup()
    }

    /// Bring every alarm instance and timer up to the current instant.
    pub async fn poll(&self) -> Result<PollReport, EngineError> {
        Ok(PollReport {
            alarms: self.alarms.tick().await?,
            timers: self.timers.poll().await?,
        })
    }

    /// Startup sweep: mark missed instances and re-arm wakeups, then
    /// settle timers.
    pub async fn recover(&self) -> Result<PollReport, EngineError> {
        Ok(PollReport {
            alarms: self.alarms.detect_missed().await?,
            timers: self.timers.poll().await?,
        })
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
