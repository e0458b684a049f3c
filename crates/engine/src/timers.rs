// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown timer service

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::executor::Executor;
use crate::locks::KeyedLocks;
use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;
use tock_adapters::Notifier;
use tock_core::{Clock, Effect, Timer, TimerError, TimerId, TimerTransition};
use tock_storage::Store;
use tracing::info;

/// Runs timer actions against the store, one request per timer at a time.
///
/// Every request first settles the timer: a countdown that reached zero is
/// expired, and one left expired too long is missed, before the action is
/// checked.
pub struct TimerService<S, N, C> {
    store: S,
    executor: Arc<Executor<N>>,
    clock: C,
    locks: KeyedLocks<TimerId>,
    missed_after: Duration,
}

impl<S, N, C> TimerService<S, N, C>
where
    S: Store,
    N: Notifier,
    C: Clock,
{
    pub fn new(store: S, executor: Arc<Executor<N>>, clock: C, config: &EngineConfig) -> Self {
        Self {
            store,
            executor,
            clock,
            locks: KeyedLocks::new(),
            missed_after: config.timer_missed,
        }
    }

    /// Create a timer in the reset state.
    pub async fn create(&self, label: String, length: Duration) -> Result<Timer, EngineError> {
        let timer = self.store.insert_timer(Timer::new(label, length)?).await?;
        info!(timer_id = %timer.id, length_ms = timer.length_ms, "timer created");
        Ok(timer)
    }

    pub async fn start(&self, id: TimerId) -> Result<Timer, EngineError> {
        self.act(id, Timer::start).await
    }

    pub async fn pause(&self, id: TimerId) -> Result<Timer, EngineError> {
        self.act(id, Timer::pause).await
    }

    pub async fn add_minute(&self, id: TimerId) -> Result<Timer, EngineError> {
        self.act(id, Timer::add_minute).await
    }

    pub async fn reset(&self, id: TimerId) -> Result<Timer, EngineError> {
        self.act(id, |timer, now| Ok(timer.reset(now))).await
    }

    pub async fn delete(&self, id: TimerId) -> Result<Timer, EngineError> {
        let guard = self.locks.lock(&id).await;
        let deleted = self.store.delete_timer(id).await;
        drop(guard);
        self.locks.prune();
        let timer = deleted?;
        info!(timer_id = %id, "timer deleted");
        Ok(timer)
    }

    /// The timer settled to the current instant.
    pub async fn get(&self, id: TimerId) -> Result<Timer, EngineError> {
        let _guard = self.locks.lock(&id).await;
        let mut timer = self.store.get_timer(id).await?;
        self.settle(&mut timer, self.clock.now()).await?;
        Ok(timer)
    }

    /// Milliseconds left on the timer right now.
    pub async fn remaining(&self, id: TimerId) -> Result<i64, EngineError> {
        let timer = self.get(id).await?;
        Ok(timer.remaining_ms(self.clock.now()))
    }

    pub async fn list(&self) -> Result<Vec<Timer>, EngineError> {
        Ok(self.store.list_timers().await?)
    }

    /// Run expiry and missed detection over every timer.
    pub async fn poll(&self) -> Result<Vec<TimerTransition>, EngineError> {
        let mut transitions = Vec::new();
        for timer in self.store.list_timers().await? {
            let _guard = self.locks.lock(&timer.id).await;
            let mut timer = match self.store.get_timer(timer.id).await {
                Ok(timer) => timer,
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e.into()),
            };
            transitions.extend(self.settle(&mut timer, self.clock.now()).await?);
        }
        Ok(transitions)
    }

    async fn act<F>(&self, id: TimerId, f: F) -> Result<Timer, EngineError>
    where
        F: FnOnce(&mut Timer, NaiveDateTime) -> Result<Vec<Effect>, TimerError> + Send,
    {
        let _guard = self.locks.lock(&id).await;
        let mut timer = self.store.get_timer(id).await?;
        let now = self.clock.now();
        self.settle(&mut timer, now).await?;
        let effects = f(&mut timer, now)?;
        self.store.update_timer(&timer).await?;
        self.executor.execute_all(effects).await;
        info!(timer_id = %id, state = %timer.state, "timer updated");
        Ok(timer)
    }

    /// Apply expiry and missed detection, saving the timer if it changed.
    async fn settle(
        &self,
        timer: &mut Timer,
        now: NaiveDateTime,
    ) -> Result<Vec<TimerTransition>, EngineError> {
        let mut effects = timer.check_expiry(now);
        effects.extend(timer.check_missed(now, self.missed_after));
        if effects.is_empty() {
            return Ok(Vec::new());
        }
        self.store.update_timer(timer).await?;
        let transitions = effects
            .iter()
            .filter_map(Effect::timer_transition)
            .cloned()
            .collect();
        self.executor.execute_all(effects).await;
        Ok(transitions)
    }
}

#[cfg(test)]
#[path = "timers_tests.rs"]
mod tests;
