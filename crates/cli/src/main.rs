// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tock - alarm clock and countdown timers

mod color;
mod commands;
mod env;
mod logging;
mod output;
mod table;

use output::OutputFormat;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{alarm, instance, timer, watch};
use tock_adapters::{NoOpNotifier, TracedNotifier};
use tock_core::SystemClock;
use tock_engine::{Engine, EngineConfig, EngineDeps};
use tock_storage::MemoryStore;

/// Engine wired to the on-disk snapshot and the system clock
pub type CliEngine = Engine<MemoryStore, TracedNotifier<NoOpNotifier>, SystemClock>;

#[derive(Parser)]
#[command(name = "tock", version, about = "tock - alarms and countdown timers")]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Alarm management
    Alarm(alarm::AlarmArgs),
    /// Pending and ringing alarm instances
    Instance(instance::InstanceArgs),
    /// Countdown timers
    Timer(timer::TimerArgs),
    /// Apply every transition that is due now
    Tick,
    /// Mark overdue alarms missed and re-arm the rest (run at boot)
    DetectMissed,
    /// Keep polling and print transitions as they happen
    Watch {
        /// Poll interval in milliseconds (default: TOCK_WATCH_MS or 1000)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains every source message the chain
/// is skipped; otherwise it is rendered like anyhow's Debug output.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = EngineConfig::from_env()?;
    let _log_guard = logging::setup_logging(&config)?;
    let engine = open_engine(config)?;

    match command {
        Commands::Alarm(args) => alarm::handle(args.command, &engine, format).await?,
        Commands::Instance(args) => instance::handle(args.command, &engine, format).await?,
        Commands::Timer(args) => timer::handle(args.command, &engine, format).await?,
        Commands::Tick => watch::tick(&engine, format).await?,
        Commands::DetectMissed => watch::detect_missed(&engine, format).await?,
        Commands::Watch { interval_ms } => watch::watch(&engine, interval_ms, format).await?,
    }
    Ok(())
}

fn open_engine(config: EngineConfig) -> Result<CliEngine> {
    let path = config.snapshot_path();
    let store = MemoryStore::open(&path)
        .with_context(|| format!("failed to open state at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "opened store");
    let deps = EngineDeps {
        store,
        notifier: TracedNotifier::new(NoOpNotifier::new()),
    };
    Ok(Engine::new(deps, SystemClock, config))
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
