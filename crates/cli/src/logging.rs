// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log file setup

use anyhow::{Context, Result};
use tock_engine::EngineConfig;
use tracing_appender::non_blocking::WorkerGuard;

/// Send tracing output to `<state dir>/tock.log`.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Keep the guard
/// alive until exit so buffered lines are flushed.
pub fn setup_logging(config: &EngineConfig) -> Result<WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_path = config.log_path();
    let dir = log_path
        .parent()
        .context("log path has no parent directory")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let file_name = log_path.file_name().context("log path has no file name")?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(guard)
}
