// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record store interface and its in-memory implementation

use crate::{Settings, Snapshot, StoreError, StoreState};
use async_trait::async_trait;
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tock_core::{Alarm, AlarmId, AlarmInstance, Alert, InstanceId, Timer, TimerId, WeekPattern};
use tracing::debug;

/// Persistent storage for alarms, instances and timers.
///
/// Inserting a record whose id is already valid keeps that id; otherwise
/// the store assigns one and returns the stored record.
#[async_trait]
pub trait Store: Clone + Send + Sync + 'static {
    async fn get_alarm(&self, id: AlarmId) -> Result<Alarm, StoreError>;
    async fn list_alarms(&self) -> Result<Vec<Alarm>, StoreError>;
    async fn insert_alarm(&self, alarm: Alarm) -> Result<Alarm, StoreError>;
    async fn update_alarm(&self, alarm: &Alarm) -> Result<(), StoreError>;
    async fn delete_alarm(&self, id: AlarmId) -> Result<Alarm, StoreError>;

    async fn get_instance(&self, id: InstanceId) -> Result<AlarmInstance, StoreError>;
    async fn insert_instance(&self, instance: AlarmInstance) -> Result<AlarmInstance, StoreError>;
    async fn update_instance(&self, instance: &AlarmInstance) -> Result<(), StoreError>;
    async fn delete_instance(&self, id: InstanceId) -> Result<AlarmInstance, StoreError>;
    /// Every instance of an alarm, terminal ones included
    async fn instances_for_alarm(&self, id: AlarmId) -> Result<Vec<AlarmInstance>, StoreError>;
    /// Every non-terminal instance, ordered by fire instant
    async fn live_instances(&self) -> Result<Vec<AlarmInstance>, StoreError>;

    async fn get_timer(&self, id: TimerId) -> Result<Timer, StoreError>;
    async fn list_timers(&self) -> Result<Vec<Timer>, StoreError>;
    async fn insert_timer(&self, timer: Timer) -> Result<Timer, StoreError>;
    async fn update_timer(&self, timer: &Timer) -> Result<(), StoreError>;
    async fn delete_timer(&self, id: TimerId) -> Result<Timer, StoreError>;

    async fn settings(&self) -> Result<Settings, StoreError>;
    async fn set_default_alert(&self, alert: Alert) -> Result<(), StoreError>;
    /// Record the day set for an alarm; `None` forgets it
    async fn remember_days(&self, id: AlarmId, days: Option<WeekPattern>)
        -> Result<(), StoreError>;
    async fn set_last_deleted(&self, alarm: Option<Alarm>) -> Result<(), StoreError>;
}

/// Store holding records in memory, optionally backed by a snapshot file.
///
/// With a snapshot path, every call takes a lock on a sibling `.lock` file
/// and reloads the snapshot first, so handles in other processes see each
/// other's changes. Changes are written through before the call returns.
/// Clones share the same records.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
    snapshot_path: Option<Arc<PathBuf>>,
}

impl MemoryStore {
    /// An empty store that is never written to disk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by `path`, loading the existing snapshot if any.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let state = {
            let _lock = lock_snapshot(&path, false)?;
            load_state(&path)?
        };
        debug!(
            path = %path.display(),
            alarms = state.alarms.len(),
            instances = state.instances.len(),
            timers = state.timers.len(),
            "opened store",
        );
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            snapshot_path: Some(Arc::new(path)),
        })
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> Result<T, StoreError> {
        let mut state = self.state.lock();
        if let Some(path) = &self.snapshot_path {
            let _lock = lock_snapshot(path, false)?;
            *state = load_state(path)?;
        }
        Ok(f(&state))
    }

    /// Apply a change and write it through.
    ///
    /// The change runs on a copy that replaces the records only once it is
    /// saved, so a failed change or a failed save leaves nothing behind.
    fn write<T>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.state.lock();
        let Some(path) = &self.snapshot_path else {
            let mut next = state.clone();
            let out = f(&mut next)?;
            *state = next;
            return Ok(out);
        };

        let _lock = lock_snapshot(path, true)?;
        let mut next = load_state(path)?;
        let out = f(&mut next)?;
        let snapshot = Snapshot::new(next);
        snapshot.save(path)?;
        *state = snapshot.state;
        Ok(out)
    }
}

fn load_state(path: &Path) -> Result<StoreState, StoreError> {
    Ok(Snapshot::load(path)?
        .map(|snapshot| snapshot.state)
        .unwrap_or_default())
}

/// Lock the snapshot's `.lock` file, shared for reads and exclusive for
/// writes. The lock is released when the returned file is dropped.
fn lock_snapshot(path: &Path, exclusive: bool) -> Result<File, StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    // Never truncate: another process may hold the lock right now
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path.with_extension("lock"))?;
    if exclusive {
        file.lock_exclusive()?;
    } else {
        file.lock_shared()?;
    }
    Ok(file)
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_alarm(&self, id: AlarmId) -> Result<Alarm, StoreError> {
        self.read(|s| s.alarms.get(&id).cloned())?
            .ok_or_else(|| StoreError::not_found("alarm", id.get()))
    }

    async fn list_alarms(&self) -> Result<Vec<Alarm>, StoreError> {
        self.read(|s| s.alarms.values().cloned().collect())
    }

    async fn insert_alarm(&self, alarm: Alarm) -> Result<Alarm, StoreError> {
        self.write(|s| Ok(s.insert_alarm(alarm)))
    }

    async fn update_alarm(&self, alarm: &Alarm) -> Result<(), StoreError> {
        self.write(|s| s.update_alarm(alarm))
    }

    async fn delete_alarm(&self, id: AlarmId) -> Result<Alarm, StoreError> {
        self.write(|s| s.delete_alarm(id))
    }

    async fn get_instance(&self, id: InstanceId) -> Result<AlarmInstance, StoreError> {
        self.read(|s| s.instances.get(&id).cloned())?
            .ok_or_else(|| StoreError::not_found("instance", id.get()))
    }

    async fn insert_instance(&self, instance: AlarmInstance) -> Result<AlarmInstance, StoreError> {
        self.write(|s| Ok(s.insert_instance(instance)))
    }

    async fn update_instance(&self, instance: &AlarmInstance) -> Result<(), StoreError> {
        self.write(|s| s.update_instance(instance))
    }

    async fn delete_instance(&self, id: InstanceId) -> Result<AlarmInstance, StoreError> {
        self.write(|s| s.delete_instance(id))
    }

    async fn instances_for_alarm(&self, id: AlarmId) -> Result<Vec<AlarmInstance>, StoreError> {
        self.read(|s| s.instances_for_alarm(id))
    }

    async fn live_instances(&self) -> Result<Vec<AlarmInstance>, StoreError> {
        self.read(StoreState::live_instances)
    }

    async fn get_timer(&self, id: TimerId) -> Result<Timer, StoreError> {
        self.read(|s| s.timers.get(&id).cloned())?
            .ok_or_else(|| StoreError::not_found("timer", id.get()))
    }

    async fn list_timers(&self) -> Result<Vec<Timer>, StoreError> {
        self.read(|s| s.timers.values().cloned().collect())
    }

    async fn insert_timer(&self, timer: Timer) -> Result<Timer, StoreError> {
        self.write(|s| Ok(s.insert_timer(timer)))
    }

    async fn update_timer(&self, timer: &Timer) -> Result<(), StoreError> {
        self.write(|s| s.update_timer(timer))
    }

    async fn delete_timer(&self, id: TimerId) -> Result<Timer, StoreError> {
        self.write(|s| s.delete_timer(id))
    }

    async fn settings(&self) -> Result<Settings, StoreError> {
        self.read(|s| s.settings.clone())
    }

    async fn set_default_alert(&self, alert: Alert) -> Result<(), StoreError> {
        self.write(|s| {
            s.settings.default_alert = Some(alert);
            Ok(())
        })
    }

    async fn remember_days(
        &self,
        id: AlarmId,
        days: Option<WeekPattern>,
    ) -> Result<(), StoreError> {
        self.write(|s| {
            match days {
                Some(days) => s.settings.remembered_days.insert(id, days),
                None => s.settings.remembered_days.remove(&id),
            };
            Ok(())
        })
    }

    async fn set_last_deleted(&self, alarm: Option<Alarm>) -> Result<(), StoreError> {
        self.write(|s| {
            s.settings.last_deleted = alarm;
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
