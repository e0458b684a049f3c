// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables read by the CLI itself.
//!
//! Engine tunables live in `tock_engine::env`.

use std::time::Duration;

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

/// Poll interval for `tock watch` (TOCK_WATCH_MS)
pub fn watch_interval() -> Option<Duration> {
    std::env::var("TOCK_WATCH_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}
