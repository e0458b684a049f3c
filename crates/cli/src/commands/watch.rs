// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock tick`, `tock detect-missed` and `tock watch`

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tock_core::{TimerTransition, Transition};
use tock_engine::PollReport;

use crate::output::{self, OutputFormat};
use crate::CliEngine;

const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Serialize)]
struct ReportJson<'a> {
    alarms: &'a [Transition],
    timers: &'a [TimerTransition],
}

/// Apply every transition that is due now.
pub async fn tick(engine: &CliEngine, format: OutputFormat) -> Result<()> {
    let report = engine.poll().await?;
    print_report(&report, format, true)
}

/// Boot sweep: mark overdue instances missed and re-arm the rest.
pub async fn detect_missed(engine: &CliEngine, format: OutputFormat) -> Result<()> {
    let report = engine.recover().await?;
    print_report(&report, format, true)
}

/// Poll until interrupted, printing transitions as they happen.
pub async fn watch(
    engine: &CliEngine,
    interval_ms: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let interval = interval_ms
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .or_else(crate::env::watch_interval)
        .unwrap_or(DEFAULT_INTERVAL);

    let report = engine.recover().await?;
    print_report(&report, format, false)?;

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("watch interrupted");
                return Ok(());
            }
        }
        let report = engine.poll().await?;
        print_report(&report, format, false)?;
    }
}

fn print_report(report: &PollReport, format: OutputFormat, always: bool) -> Result<()> {
    if format == OutputFormat::Json {
        if always || !report.is_empty() {
            output::print_json(&ReportJson {
                alarms: &report.alarms,
                timers: &report.timers,
            })?;
        }
        return Ok(());
    }

    if report.is_empty() {
        if always {
            println!("Nothing due");
        }
        return Ok(());
    }
    for line in report_lines(report) {
        println!("{line}");
    }
    Ok(())
}

/// One line per transition, alarms first.
pub fn report_lines(report: &PollReport) -> Vec<String> {
    let alarms = report.alarms.iter().map(|t| {
        format!(
            "{} instance {} (alarm {}): {} -> {}",
            output::format_instant(t.at),
            t.instance_id,
            t.alarm_id,
            t.from,
            t.to
        )
    });
    let timers = report.timers.iter().map(|t| {
        format!(
            "{} timer {}: {} -> {}",
            output::format_instant(t.at),
            t.timer_id,
            t.from,
            t.to
        )
    });
    alarms.chain(timers).collect()
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
