// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory record tables and id allocation

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tock_core::{Alarm, AlarmId, AlarmInstance, Alert, InstanceId, Timer, TimerId, WeekPattern};

/// User preferences and edit history that outlive a single request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Alert given to new alarms; the last ringtone the user picked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_alert: Option<Alert>,
    /// Day set to restore when repeat is turned back on
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub remembered_days: BTreeMap<AlarmId, WeekPattern>,
    /// Most recently deleted alarm, kept for undo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_deleted: Option<Alarm>,
}

/// All persisted records.
///
/// Ids are allocated per table, starting at 1. Records inserted with an id
/// already set keep it, and the counter moves past it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub alarms: BTreeMap<AlarmId, Alarm>,
    #[serde(default)]
    pub instances: BTreeMap<InstanceId, AlarmInstance>,
    #[serde(default)]
    pub timers: BTreeMap<TimerId, Timer>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    next_alarm_id: i64,
    #[serde(default)]
    next_instance_id: i64,
    #[serde(default)]
    next_timer_id: i64,
}

fn allocate(counter: &mut i64, requested: i64) -> i64 {
    let id = if requested >= 1 {
        requested
    } else {
        (*counter).max(1)
    };
    *counter = (*counter).max(id + 1);
    id
}

impl StoreState {
    // ── Alarms ──────────────────────────────────────────────────────────────

    pub fn insert_alarm(&mut self, mut alarm: Alarm) -> Alarm {
        alarm.id = AlarmId::new(allocate(&mut self.next_alarm_id, alarm.id.get()));
        self.alarms.insert(alarm.id, alarm.clone());
        alarm
    }

    pub fn update_alarm(&mut self, alarm: &Alarm) -> Result<(), StoreError> {
        let slot = self
            .alarms
            .get_mut(&alarm.id)
            .ok_or_else(|| StoreError::not_found("alarm", alarm.id.get()))?;
        *slot = alarm.clone();
        Ok(())
    }

    /// Remove an alarm. Its instances are left for the caller to release.
    pub fn delete_alarm(&mut self, id: AlarmId) -> Result<Alarm, StoreError> {
        self.alarms
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("alarm", id.get()))
    }

    // ── Instances ───────────────────────────────────────────────────────────

    pub fn insert_instance(&mut self, mut instance: AlarmInstance) -> AlarmInstance {
        instance.id = InstanceId::new(allocate(&mut self.next_instance_id, instance.id.get()));
        self.instances.insert(instance.id, instance.clone());
        instance
    }

    pub fn update_instance(&mut self, instance: &AlarmInstance) -> Result<(), StoreError> {
        let slot = self
            .instances
            .get_mut(&instance.id)
            .ok_or_else(|| StoreError::not_found("instance", instance.id.get()))?;
        *slot = instance.clone();
        Ok(())
    }

    pub fn delete_instance(&mut self, id: InstanceId) -> Result<AlarmInstance, StoreError> {
        self.instances
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("instance", id.get()))
    }

    pub fn instances_for_alarm(&self, alarm_id: AlarmId) -> Vec<AlarmInstance> {
        self.instances
            .values()
            .filter(|i| i.alarm_id == alarm_id)
            .cloned()
            .collect()
    }

    /// Every non-terminal instance, ordered by fire instant.
    pub fn live_instances(&self) -> Vec<AlarmInstance> {
        let mut live: Vec<_> = self
            .instances
            .values()
            .filter(|i| i.is_live())
            .cloned()
            .collect();
        live.sort_by_key(|i| (i.fire_at, i.id));
        live
    }

    // ── Timers ──────────────────────────────────────────────────────────────

    pub fn insert_timer(&mut self, mut timer: Timer) -> Timer {
        timer.id = TimerId::new(allocate(&mut self.next_timer_id, timer.id.get()));
        self.timers.insert(timer.id, timer.clone());
        timer
    }

    pub fn update_timer(&mut self, timer: &Timer) -> Result<(), StoreError> {
        let slot = self
            .timers
            .get_mut(&timer.id)
            .ok_or_else(|| StoreError::not_found("timer", timer.id.get()))?;
        *slot = timer.clone();
        Ok(())
    }

    pub fn delete_timer(&mut self, id: TimerId) -> Result<Timer, StoreError> {
        self.timers
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("timer", id.get()))
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
