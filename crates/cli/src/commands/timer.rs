// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock timer` - countdown timers

use anyhow::Result;
use chrono::Duration;
use clap::{Args, Subcommand};
use tock_core::{Clock, Timer, TimerId};

use crate::output::{self, OutputFormat};
use crate::table::{Column, Table};
use crate::CliEngine;

#[derive(Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    pub command: TimerCommand,
}

#[derive(Subcommand)]
pub enum TimerCommand {
    /// Create a timer, e.g. `tock timer create 5m`
    Create {
        /// Length such as 90s, 5m, 1h30m (a bare number means minutes)
        #[arg(value_parser = parse_length)]
        length: Duration,
        #[arg(long, default_value = "")]
        label: String,
        /// Start counting down immediately
        #[arg(long)]
        start: bool,
    },
    Start { id: i64 },
    Pause { id: i64 },
    /// Add one minute; restarts an expired timer with one minute left
    AddMinute { id: i64 },
    /// Return to the original length
    Reset { id: i64 },
    Delete { id: i64 },
    List,
}

/// Parse a timer length: unit-suffixed parts (`1h30m`, `90s`) or a bare
/// number of minutes.
pub fn parse_length(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if let Ok(minutes) = s.parse::<i64>() {
        return positive(Duration::minutes(minutes), s);
    }

    let mut total = Duration::zero();
    let mut digits = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let value: i64 = digits
            .parse()
            .map_err(|_| format!("invalid length '{s}': expected a number before '{c}'"))?;
        total += match c {
            'h' => Duration::hours(value),
            'm' => Duration::minutes(value),
            's' => Duration::seconds(value),
            _ => return Err(format!("invalid length '{s}': unknown unit '{c}'")),
        };
        digits.clear();
    }
    if !digits.is_empty() {
        return Err(format!("invalid length '{s}': missing unit after {digits}"));
    }
    positive(total, s)
}

fn positive(length: Duration, s: &str) -> Result<Duration, String> {
    if length > Duration::zero() {
        Ok(length)
    } else {
        Err(format!("invalid length '{s}': must be positive"))
    }
}

pub async fn handle(command: TimerCommand, engine: &CliEngine, format: OutputFormat) -> Result<()> {
    let timers = engine.timers();
    let timer = match command {
        TimerCommand::Create {
            length,
            label,
            start,
        } => {
            let timer = timers.create(label, length).await?;
            if start {
                timers.start(timer.id).await?
            } else {
                timer
            }
        }
        TimerCommand::Start { id } => timers.start(TimerId::new(id)).await?,
        TimerCommand::Pause { id } => timers.pause(TimerId::new(id)).await?,
        TimerCommand::AddMinute { id } => timers.add_minute(TimerId::new(id)).await?,
        TimerCommand::Reset { id } => timers.reset(TimerId::new(id)).await?,
        TimerCommand::Delete { id } => {
            let timer = timers.delete(TimerId::new(id)).await?;
            match format {
                OutputFormat::Text => println!("Deleted timer {}", timer.id),
                OutputFormat::Json => output::print_json(&timer)?,
            }
            return Ok(());
        }
        TimerCommand::List => return list(engine, format).await,
    };

    match format {
        OutputFormat::Text => {
            let now = engine.clock().now();
            println!(
                "Timer {} {} {}",
                timer.id,
                timer.state,
                output::timer_reading(&timer, now)
            );
        }
        OutputFormat::Json => output::print_json(&timer)?,
    }
    Ok(())
}

async fn list(engine: &CliEngine, format: OutputFormat) -> Result<()> {
    // Settle each timer first so expiry shows up without a separate poll
    engine.timers().poll().await?;
    let timers: Vec<Timer> = engine.timers().list().await?;
    if format == OutputFormat::Json {
        return output::print_json(&timers);
    }
    if timers.is_empty() {
        println!("No timers");
        return Ok(());
    }

    let now = engine.clock().now();
    let mut table = Table::new(vec![
        Column::plain("ID"),
        Column::plain("REMAINING"),
        Column::plain("LENGTH"),
        Column::status("STATE"),
        Column::muted("LABEL"),
    ]);
    for timer in &timers {
        table.row(vec![
            timer.id.to_string(),
            output::timer_reading(timer, now),
            tock_core::format_countdown(timer.total_ms),
            timer.state.to_string(),
            timer.label.clone(),
        ]);
    }
    table.render(&mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
