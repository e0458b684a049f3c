// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ringtone title lookup.
//!
//! Resolving a ringtone reference to a display title may be slow, so hosts
//! wrap their lookup in [`CachedRingtoneTitles`] and call
//! [`CachedRingtoneTitles::invalidate`] when access to the sounds changes.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tock_core::{Alert, DEFAULT_ALERT_URI};

/// Title shown for the silent alert
pub const SILENT_TITLE: &str = "Silent";

/// Title shown for the system default alarm sound
pub const DEFAULT_TITLE: &str = "Default alarm sound";

/// Resolves a ringtone reference to a human-readable title.
pub trait RingtoneLookup: Send + Sync + 'static {
    /// Title for `uri`, or `None` if it cannot be resolved.
    fn title(&self, uri: &str) -> Option<String>;
}

/// Lookup that derives titles from the reference itself.
///
/// The system default maps to [`DEFAULT_TITLE`]; anything else uses the
/// last path segment without its extension, with `_` and `-` as spaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileNameLookup;

impl RingtoneLookup for FileNameLookup {
    fn title(&self, uri: &str) -> Option<String> {
        if uri == DEFAULT_ALERT_URI {
            return Some(DEFAULT_TITLE.to_string());
        }
        let path = uri.split_once("://").map_or(uri, |(_, rest)| rest);
        let stem = Path::new(path).file_stem()?.to_str()?;
        let title = stem.replace(['_', '-'], " ").trim().to_string();
        (!title.is_empty()).then_some(title)
    }
}

/// Caching wrapper around a [`RingtoneLookup`].
///
/// Failed lookups are cached too, so an unreadable sound is not retried
/// until the cache is invalidated. Clones share the cache.
pub struct CachedRingtoneTitles<L> {
    lookup: Arc<L>,
    cache: Arc<Mutex<HashMap<String, Option<String>>>>,
}

impl<L> Clone for CachedRingtoneTitles<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<L: RingtoneLookup> CachedRingtoneTitles<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup: Arc::new(lookup),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Title for an alert; `None` when the ringtone cannot be resolved.
    pub fn title(&self, alert: &Alert) -> Option<String> {
        match alert {
            Alert::Silent => Some(SILENT_TITLE.to_string()),
            Alert::Ringtone(uri) => self.title_for_uri(uri),
        }
    }

    pub fn title_for_uri(&self, uri: &str) -> Option<String> {
        if let Some(cached) = self.cache.lock().get(uri) {
            return cached.clone();
        }
        let title = self.lookup.title(uri);
        tracing::debug!(uri, resolved = title.is_some(), "ringtone title lookup");
        self.cache.lock().insert(uri.to_string(), title.clone());
        title
    }

    /// Drop every cached title.
    pub fn invalidate(&self) {
        let dropped = {
            let mut cache = self.cache.lock();
            let n = cache.len();
            cache.clear();
            n
        };
        tracing::debug!(dropped, "ringtone title cache invalidated");
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "ringtone_tests.rs"]
mod tests;
