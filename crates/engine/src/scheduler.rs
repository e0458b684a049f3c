// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm scheduler.
//!
//! Turns alarm edits into materialized instances. Every request for an
//! alarm runs under that alarm's lock, so an alarm never has more than one
//! live instance. Whole-alarm edits through
//! [`on_alarm_changed`](AlarmScheduler::on_alarm_changed) take a generation
//! ticket before queueing; one overtaken by a newer one for the same alarm
//! is dropped and reports [`Applied::Superseded`]. Single-field edits apply
//! in arrival order.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::executor::Executor;
use crate::locks::{KeyGuard, KeyedLocks};
use chrono::{Duration, NaiveDateTime, Weekday};
use std::sync::Arc;
use tock_adapters::Notifier;
use tock_core::{
    Alarm, AlarmChange, AlarmId, AlarmInstance, Alert, Clock, ClockSkew, Effect, InstanceError,
    InstanceId, InstanceState, InstanceTimings, TimeOfDay, Transition, WeekPattern,
};
use tock_storage::Store;
use tracing::{debug, info, warn};

/// Outcome of reconciling an alarm with its instances
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The alarm has this pre-fire instance (new, or kept unchanged)
    Scheduled(AlarmInstance),
    /// A snoozed instance survived a cosmetic edit
    Preserved(AlarmInstance),
    /// The alarm is disabled and has no live instance
    Idle,
    /// A newer edit for the same alarm replaced this one
    Superseded,
}

impl Applied {
    pub fn instance(&self) -> Option<&AlarmInstance> {
        match self {
            Applied::Scheduled(instance) | Applied::Preserved(instance) => Some(instance),
            Applied::Idle | Applied::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Applied::Superseded)
    }
}

/// Result of an edit helper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The alarm as stored after the edit
    pub alarm: Alarm,
    pub applied: Applied,
    /// The alarm now fires at a new instant the user should be told about
    pub next_fire_changed: bool,
}

/// Schedules alarm instances against a store, notifier and clock
pub struct AlarmScheduler<S, N, C> {
    store: S,
    executor: Arc<Executor<N>>,
    clock: C,
    locks: KeyedLocks<AlarmId>,
    snooze: Duration,
    timings: InstanceTimings,
    default_alert: Alert,
}

impl<S, N, C> AlarmScheduler<S, N, C>
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
            snooze: config.snooze,
            timings: config.timings,
            default_alert: config.default_alert.clone(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn timings(&self) -> &InstanceTimings {
        &self.timings
    }

    // ── Alarm edits ─────────────────────────────────────────────────────────

    /// Store an edited alarm and bring its instances in line with it.
    pub async fn on_alarm_changed(
        &self,
        alarm: Alarm,
        change: AlarmChange,
    ) -> Result<Applied, EngineError> {
        let Some(_guard) = self.locks.ticket(&alarm.id).acquire().await else {
            debug!(alarm_id = %alarm.id, %change, "edit superseded");
            return Ok(Applied::Superseded);
        };
        self.store.update_alarm(&alarm).await?;
        self.reconcile(&alarm, change).await
    }

    /// Delete an alarm and every instance it owns.
    ///
    /// The alarm is kept for [`undo_delete`](Self::undo_delete).
    pub async fn on_alarm_deleted(&self, id: AlarmId) -> Result<Alarm, EngineError> {
        let guard = self.locks.supersede(&id).await;
        let deleted = self.delete_alarm(id).await;
        drop(guard);
        self.locks.prune();
        deleted
    }

    async fn delete_alarm(&self, id: AlarmId) -> Result<Alarm, EngineError> {
        let alarm = self.store.get_alarm(id).await?;
        for instance in self.store.instances_for_alarm(id).await? {
            self.invalidate(&instance).await?;
        }
        self.store.delete_alarm(id).await?;
        self.store.set_last_deleted(Some(alarm.clone())).await?;
        info!(alarm_id = %id, "alarm deleted");
        Ok(alarm)
    }

    /// Persist a new alarm and schedule it when enabled.
    pub async fn add_alarm(&self, alarm: Alarm) -> Result<Edit, EngineError> {
        let alarm = self.store.insert_alarm(alarm).await?;
        let _guard = self.locks.lock(&alarm.id).await;
        let applied = self.reconcile(&alarm, AlarmChange::TimingChange).await?;
        info!(alarm_id = %alarm.id, time = %alarm.time, enabled = alarm.enabled, "alarm added");
        Ok(Edit {
            next_fire_changed: alarm.enabled,
            alarm,
            applied,
        })
    }

    /// An unsaved alarm at `time` carrying the current default alert.
    pub async fn new_alarm(&self, time: TimeOfDay) -> Result<Alarm, EngineError> {
        Ok(Alarm::new(time, self.default_alert().await?))
    }

    /// Alert for new alarms: the last ringtone picked, else the configured one.
    pub async fn default_alert(&self) -> Result<Alert, EngineError> {
        let settings = self.store.settings().await?;
        Ok(settings
            .default_alert
            .unwrap_or_else(|| self.default_alert.clone()))
    }

    /// Restore the most recently deleted alarm with its original id.
    pub async fn undo_delete(&self) -> Result<Option<Edit>, EngineError> {
        let Some(alarm) = self.store.settings().await?.last_deleted else {
            return Ok(None);
        };
        let _guard = self.locks.supersede(&alarm.id).await;
        self.store.set_last_deleted(None).await?;
        let alarm = self.store.insert_alarm(alarm).await?;
        let applied = self.reconcile(&alarm, AlarmChange::TimingChange).await?;
        info!(alarm_id = %alarm.id, "alarm restored");
        Ok(Some(Edit {
            next_fire_changed: alarm.enabled,
            alarm,
            applied,
        }))
    }

    /// Change the time; this also enables the alarm.
    pub async fn set_time(&self, id: AlarmId, time: TimeOfDay) -> Result<Edit, EngineError> {
        self.edit(id, move |alarm| {
            alarm.time = time;
            alarm.enabled = true;
        })
        .await
    }

    pub async fn set_enabled(&self, id: AlarmId, enabled: bool) -> Result<Edit, EngineError> {
        self.edit(id, move |alarm| alarm.enabled = enabled).await
    }

    pub async fn set_label(&self, id: AlarmId, label: String) -> Result<Edit, EngineError> {
        self.edit(id, move |alarm| alarm.label = label).await
    }

    /// Change the alert; it becomes the default for new alarms.
    pub async fn set_alert(&self, id: AlarmId, alert: Alert) -> Result<Edit, EngineError> {
        let chosen = alert.clone();
        let edit = self.edit(id, move |alarm| alarm.alert = chosen).await?;
        self.store.set_default_alert(alert).await?;
        Ok(edit)
    }

    pub async fn set_vibrate(&self, id: AlarmId, vibrate: bool) -> Result<Edit, EngineError> {
        self.edit(id, move |alarm| alarm.vibrate = vibrate).await
    }

    /// Flip one weekday. Clearing the last day makes the alarm one-shot.
    pub async fn toggle_day(&self, id: AlarmId, day: Weekday) -> Result<Edit, EngineError> {
        let (_guard, old) = self.begin_edit(id).await?;
        let mut alarm = old.clone();
        alarm.days.set(day, !old.days.is_set(day));
        if !alarm.days.is_repeating() {
            self.store.remember_days(id, Some(WeekPattern::NONE)).await?;
        }
        self.finish_edit(old, alarm).await
    }

    /// Turn repeat on or off.
    ///
    /// Turning it off remembers the day set; turning it back on restores
    /// it, or selects every day when nothing usable is remembered.
    pub async fn set_repeat(&self, id: AlarmId, repeat: bool) -> Result<Edit, EngineError> {
        let (_guard, old) = self.begin_edit(id).await?;
        let mut alarm = old.clone();
        if repeat {
            if !old.is_repeating() {
                let remembered = self.store.settings().await?.remembered_days.get(&id).copied();
                alarm.days = remembered
                    .filter(WeekPattern::is_repeating)
                    .unwrap_or(WeekPattern::EVERY_DAY);
            }
        } else {
            if old.is_repeating() {
                self.store.remember_days(id, Some(old.days)).await?;
            }
            alarm.days = WeekPattern::NONE;
        }
        self.finish_edit(old, alarm).await
    }

    async fn edit<F>(&self, id: AlarmId, f: F) -> Result<Edit, EngineError>
    where
        F: FnOnce(&mut Alarm) + Send,
    {
        let (_guard, old) = self.begin_edit(id).await?;
        let mut alarm = old.clone();
        f(&mut alarm);
        self.finish_edit(old, alarm).await
    }

    /// Wait for the alarm, then read it. Helpers are never superseded.
    async fn begin_edit(&self, id: AlarmId) -> Result<(KeyGuard, Alarm), EngineError> {
        let guard = self.locks.lock(&id).await;
        let alarm = self.store.get_alarm(id).await?;
        Ok((guard, alarm))
    }

    async fn finish_edit(&self, old: Alarm, alarm: Alarm) -> Result<Edit, EngineError> {
        let change = AlarmChange::between(&old, &alarm);
        self.store.update_alarm(&alarm).await?;
        let applied = self.reconcile(&alarm, change).await?;

        let before = old.next_trigger(self.clock.now());
        let next_fire_changed = change == AlarmChange::TimingChange
            && alarm.enabled
            && (!old.enabled || applied.instance().map(|i| i.fire_at) != before);
        info!(alarm_id = %alarm.id, %change, next_fire_changed, "alarm edited");
        Ok(Edit {
            alarm,
            applied,
            next_fire_changed,
        })
    }

    // ── Instance actions ────────────────────────────────────────────────────

    pub async fn snooze(&self, id: InstanceId) -> Result<AlarmInstance, EngineError> {
        let (snooze, timings) = (self.snooze, self.timings);
        self.act(id, move |instance, now| instance.snooze(now, snooze, &timings))
            .await
    }

    pub async fn dismiss(&self, id: InstanceId) -> Result<AlarmInstance, EngineError> {
        let timings = self.timings;
        self.act(id, move |instance, now| instance.dismiss(now, &timings))
            .await
    }

    /// Dismiss a notifying or snoozed instance before it rings.
    pub async fn predismiss(&self, id: InstanceId) -> Result<AlarmInstance, EngineError> {
        let timings = self.timings;
        self.act(id, move |instance, now| instance.predismiss(now, &timings))
            .await
    }

    async fn act<F>(&self, id: InstanceId, f: F) -> Result<AlarmInstance, EngineError>
    where
        F: FnOnce(&mut AlarmInstance, NaiveDateTime) -> Result<Vec<Effect>, InstanceError> + Send,
    {
        let alarm_id = self.store.get_instance(id).await?.alarm_id;
        let _guard = self.locks.lock(&alarm_id).await;
        let mut instance = self.store.get_instance(id).await?;
        let now = self.observe(&instance);
        let effects = f(&mut instance, now)?;
        self.store.update_instance(&instance).await?;
        self.executor.execute_all(effects).await;
        info!(instance_id = %id, %alarm_id, state = %instance.state, "instance updated");
        if instance.is_terminal() {
            self.follow_up(&instance, now).await?;
            self.compact(&instance).await?;
        }
        Ok(instance)
    }

    // ── Sweeps ──────────────────────────────────────────────────────────────

    /// Advance every live instance to the current instant.
    pub async fn tick(&self) -> Result<Vec<Transition>, EngineError> {
        let timings = self.timings;
        self.sweep(move |instance, now| instance.advance(now, &timings))
            .await
    }

    /// Mark instances whose deadline passed unrung as missed, then re-arm
    /// the wakeups of everything still live.
    ///
    /// Hosts call this after boot or a wall-clock change.
    pub async fn detect_missed(&self) -> Result<Vec<Transition>, EngineError> {
        let timings = self.timings;
        let transitions = self
            .sweep(move |instance, now| instance.detect_missed(now, &timings))
            .await?;
        for instance in self.store.live_instances().await? {
            self.executor.execute_all(instance.arm(&self.timings)).await;
        }
        Ok(transitions)
    }

    async fn sweep<F>(&self, f: F) -> Result<Vec<Transition>, EngineError>
    where
        F: Fn(&mut AlarmInstance, NaiveDateTime) -> Vec<Effect> + Send + Sync,
    {
        let mut transitions = Vec::new();
        for candidate in self.store.live_instances().await? {
            let _guard = self.locks.lock(&candidate.alarm_id).await;
            let mut instance = match self.store.get_instance(candidate.id).await {
                Ok(instance) if instance.is_live() => instance,
                Ok(_) => continue,
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e.into()),
            };
            let now = self.observe(&instance);
            let effects = f(&mut instance, now);
            if effects.is_empty() {
                continue;
            }
            self.store.update_instance(&instance).await?;
            transitions.extend(effects.iter().filter_map(Effect::transition).cloned());
            self.executor.execute_all(effects).await;
            if instance.is_terminal() {
                self.follow_up(&instance, now).await?;
                self.compact(&instance).await?;
            }
        }
        Ok(transitions)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub async fn alarm(&self, id: AlarmId) -> Result<Alarm, EngineError> {
        Ok(self.store.get_alarm(id).await?)
    }

    pub async fn alarms(&self) -> Result<Vec<Alarm>, EngineError> {
        Ok(self.store.list_alarms().await?)
    }

    pub async fn instance(&self, id: InstanceId) -> Result<AlarmInstance, EngineError> {
        Ok(self.store.get_instance(id).await?)
    }

    /// Every instance of an alarm, terminal ones included.
    pub async fn instances(&self, id: AlarmId) -> Result<Vec<AlarmInstance>, EngineError> {
        Ok(self.store.instances_for_alarm(id).await?)
    }

    /// The alarm's live instance, if it has one.
    pub async fn live_instance(&self, id: AlarmId) -> Result<Option<AlarmInstance>, EngineError> {
        Ok(self
            .store
            .instances_for_alarm(id)
            .await?
            .into_iter()
            .find(AlarmInstance::is_live))
    }

    pub async fn live_instances(&self) -> Result<Vec<AlarmInstance>, EngineError> {
        Ok(self.store.live_instances().await?)
    }

    /// The next instance that has yet to ring.
    pub async fn next_alarm(&self) -> Result<Option<AlarmInstance>, EngineError> {
        Ok(self
            .store
            .live_instances()
            .await?
            .into_iter()
            .filter(|i| i.state.is_pre_fire() || i.state == InstanceState::Snoozed)
            .min_by_key(|i| (i.snoozed_until.unwrap_or(i.fire_at), i.id)))
    }

    pub fn is_tomorrow(&self, alarm: &Alarm) -> bool {
        alarm.is_tomorrow(self.clock.now())
    }

    // ── Internals ───────────────────────────────────────────────────────────

    /// Make the alarm's live instances agree with its definition.
    async fn reconcile(&self, alarm: &Alarm, change: AlarmChange) -> Result<Applied, EngineError> {
        let now = self.clock.now();
        let target = alarm.next_trigger(now);
        let mut preserved = None;
        let mut kept = None;

        for instance in self.store.instances_for_alarm(alarm.id).await? {
            if !instance.is_live() {
                continue;
            }
            if preserved.is_none()
                && change == AlarmChange::CosmeticChange
                && instance.state == InstanceState::Snoozed
            {
                preserved = Some(instance);
                continue;
            }
            if kept.is_none()
                && instance.state.is_pre_fire()
                && Some(instance.fire_at) == target
                && instance.matches_snapshot(alarm)
            {
                kept = Some(instance);
                continue;
            }
            self.invalidate(&instance).await?;
        }

        if let Some(instance) = preserved {
            if let Some(extra) = kept {
                self.invalidate(&extra).await?;
            }
            debug!(alarm_id = %alarm.id, instance_id = %instance.id, "snooze preserved");
            return Ok(Applied::Preserved(instance));
        }
        if let Some(instance) = kept {
            self.executor.execute_all(instance.arm(&self.timings)).await;
            return Ok(Applied::Scheduled(instance));
        }
        match alarm.create_instance(now) {
            Some(instance) => Ok(Applied::Scheduled(self.materialize(instance, now).await?)),
            None => Ok(Applied::Idle),
        }
    }

    /// Store a new instance, step it to `now` and arm its wakeup.
    async fn materialize(
        &self,
        instance: AlarmInstance,
        now: NaiveDateTime,
    ) -> Result<AlarmInstance, EngineError> {
        let mut instance = self.store.insert_instance(instance).await?;
        let effects = instance.advance(now, &self.timings);
        let effects = if effects.is_empty() {
            instance.arm(&self.timings)
        } else {
            self.store.update_instance(&instance).await?;
            effects
        };
        self.executor.execute_all(effects).await;
        info!(
            alarm_id = %instance.alarm_id,
            instance_id = %instance.id,
            fire_at = %instance.fire_at,
            state = %instance.state,
            "instance scheduled",
        );
        Ok(instance)
    }

    /// Drop an instance without firing it.
    async fn invalidate(&self, instance: &AlarmInstance) -> Result<(), EngineError> {
        self.store.delete_instance(instance.id).await?;
        self.executor.execute_all(instance.release()).await;
        debug!(
            alarm_id = %instance.alarm_id,
            instance_id = %instance.id,
            state = %instance.state,
            "instance invalidated",
        );
        Ok(())
    }

    /// After an instance ends: schedule the next firing of a repeating
    /// alarm, or disable a one-shot alarm.
    async fn follow_up(
        &self,
        released: &AlarmInstance,
        now: NaiveDateTime,
    ) -> Result<(), EngineError> {
        let mut alarm = match self.store.get_alarm(released.alarm_id).await {
            Ok(alarm) => alarm,
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        if !alarm.enabled {
            return Ok(());
        }
        if !alarm.is_repeating() {
            alarm.enabled = false;
            self.store.update_alarm(&alarm).await?;
            info!(alarm_id = %alarm.id, "one-shot alarm disabled");
            return Ok(());
        }
        let instances = self.store.instances_for_alarm(alarm.id).await?;
        if instances.iter().any(AlarmInstance::is_live) {
            return Ok(());
        }
        if let Some(next) = alarm.create_instance_after(released.fire_at, now) {
            self.materialize(next, now).await?;
        }
        Ok(())
    }

    /// Delete the alarm's older terminal instances; `latest` stays so
    /// a repeated action on it still reports the state it ended in.
    async fn compact(&self, latest: &AlarmInstance) -> Result<(), EngineError> {
        for instance in self.store.instances_for_alarm(latest.alarm_id).await? {
            if instance.is_terminal() && instance.id != latest.id {
                self.store.delete_instance(instance.id).await?;
                debug!(
                    alarm_id = %instance.alarm_id,
                    instance_id = %instance.id,
                    state = %instance.state,
                    "ended instance removed",
                );
            }
        }
        Ok(())
    }

    /// Read the clock for work on `instance`, reporting skew.
    fn observe(&self, instance: &AlarmInstance) -> NaiveDateTime {
        let now = self.clock.now();
        if let Some(skew) = ClockSkew::detect(instance.updated_at, now) {
            warn!(instance_id = %instance.id, error = %skew, "clock skew");
        }
        now
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
