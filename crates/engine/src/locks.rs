// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-key request serialization.
//!
//! Requests for the same key run one at a time; different keys proceed
//! concurrently. Edits take a [`Ticket`] before queueing so a newer edit
//! for the same key supersedes any older one still waiting. Slots for keys
//! nobody holds or waits on are dropped by [`KeyedLocks::prune`].

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

struct Slot {
    lock: Arc<AsyncMutex<()>>,
    generation: AtomicU64,
}

impl Slot {
    fn new() -> Self {
        Self {
            lock: Arc::new(AsyncMutex::new(())),
            generation: AtomicU64::new(0),
        }
    }
}

/// Async mutex per key with last-write-wins tickets
pub struct KeyedLocks<K> {
    slots: Mutex<HashMap<K, Arc<Slot>>>,
}

impl<K: Eq + Hash + Clone> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

/// Held while a request for a key runs
pub struct KeyGuard {
    _guard: OwnedMutexGuard<()>,
}

/// Place in line for an edit; stale once a later ticket is taken
pub struct Ticket {
    slot: Arc<Slot>,
    generation: u64,
}

impl Ticket {
    /// Wait for the key, or `None` if a later ticket was taken meanwhile.
    pub async fn acquire(self) -> Option<KeyGuard> {
        let guard = Arc::clone(&self.slot.lock).lock_owned().await;
        if self.slot.generation.load(Ordering::SeqCst) != self.generation {
            return None;
        }
        Some(KeyGuard { _guard: guard })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &K) -> Arc<Slot> {
        let mut slots = self.slots.lock();
        Arc::clone(
            slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Slot::new())),
        )
    }

    /// Take a ticket for an edit, superseding every earlier ticket.
    pub fn ticket(&self, key: &K) -> Ticket {
        let slot = self.slot(key);
        let generation = slot.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { slot, generation }
    }

    /// Supersede every waiting edit, then wait for the key.
    pub async fn supersede(&self, key: &K) -> KeyGuard {
        let slot = self.slot(key);
        slot.generation.fetch_add(1, Ordering::SeqCst);
        KeyGuard {
            _guard: Arc::clone(&slot.lock).lock_owned().await,
        }
    }

    /// Wait for the key without taking part in supersession.
    pub async fn lock(&self, key: &K) -> KeyGuard {
        let slot = self.slot(key);
        KeyGuard {
            _guard: Arc::clone(&slot.lock).lock_owned().await,
        }
    }

    /// Drop every slot with no guard, waiter or ticket left.
    ///
    /// Anything still using a slot holds a clone of it or of its mutex, and
    /// new users only reach it through the map, so a slot counted idle here
    /// cannot be picked up meanwhile.
    pub fn prune(&self) {
        self.slots.lock().retain(|_, slot| {
            Arc::strong_count(slot) > 1 || Arc::strong_count(&slot.lock) > 1
        });
    }

    /// Number of keys with a slot.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
