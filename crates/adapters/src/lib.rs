// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters between the tock engine and its host

pub mod notify;
pub mod ringtone;
pub mod traced;

pub use notify::{NoOpNotifier, Notifier, NotifyError};
pub use ringtone::{CachedRingtoneTitles, FileNameLookup, RingtoneLookup};
pub use traced::TracedNotifier;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifier, NotifierCall};
