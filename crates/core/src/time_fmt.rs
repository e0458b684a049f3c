// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable formatting for countdowns and "fires in" hints.

use chrono::Duration;

/// Format a span as a short hint: `"45s"`, `"2m"`, `"1h30m"`, `"3d4h"`.
///
/// Negative spans format as zero.
pub fn format_span(span: Duration) -> String {
    let secs = span.num_seconds().max(0);
    if secs < 60 {
        return format!("{}s", secs);
    }
    let (days, hours, minutes) = (secs / 86_400, (secs % 86_400) / 3600, (secs % 3600) / 60);
    match (days, hours, minutes) {
        (0, 0, m) => format!("{}m", m),
        (0, h, 0) => format!("{}h", h),
        (0, h, m) => format!("{}h{}m", h, m),
        (d, 0, _) => format!("{}d", d),
        (d, h, _) => format!("{}d{}h", d, h),
    }
}

/// Format a timer reading as `M:SS` or `H:MM:SS`.
///
/// Partial seconds round up, so a timer reads `0:00` only once it has
/// actually run out. Negative values (time overdue) get a leading `-`.
pub fn format_countdown(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let magnitude = ms.unsigned_abs();
    let total_secs = if ms < 0 {
        magnitude / 1000
    } else {
        magnitude.div_ceil(1000)
    };
    let (h, m, s) = (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60);
    if h > 0 {
        format!("{}{}:{:02}:{:02}", sign, h, m, s)
    } else {
        format!("{}{}:{:02}", sign, m, s)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
