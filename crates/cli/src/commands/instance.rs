// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock instance` - pending and ringing firings

use anyhow::Result;
use clap::{Args, Subcommand};
use tock_core::{AlarmInstance, Clock, InstanceId};

use crate::color;
use crate::output::{self, OutputFormat};
use crate::table::{Column, Table};
use crate::CliEngine;

#[derive(Args)]
pub struct InstanceArgs {
    #[command(subcommand)]
    pub command: InstanceCommand,
}

#[derive(Subcommand)]
pub enum InstanceCommand {
    /// List live instances, soonest first
    List,
    /// Silence a ringing alarm for the snooze length
    Snooze { id: i64 },
    /// Stop a ringing or snoozed alarm
    Dismiss { id: i64 },
    /// Dismiss an upcoming alarm before it rings
    Predismiss { id: i64 },
}

pub async fn handle(
    command: InstanceCommand,
    engine: &CliEngine,
    format: OutputFormat,
) -> Result<()> {
    let alarms = engine.alarms();
    let instance = match command {
        InstanceCommand::List => return list(engine, format).await,
        InstanceCommand::Snooze { id } => alarms.snooze(InstanceId::new(id)).await?,
        InstanceCommand::Dismiss { id } => alarms.dismiss(InstanceId::new(id)).await?,
        InstanceCommand::Predismiss { id } => alarms.predismiss(InstanceId::new(id)).await?,
    };
    match format {
        OutputFormat::Text => print_outcome(&instance),
        OutputFormat::Json => output::print_json(&instance)?,
    }
    Ok(())
}

fn print_outcome(instance: &AlarmInstance) {
    match instance.snoozed_until {
        Some(until) => println!(
            "Instance {} snoozed until {}",
            instance.id,
            output::format_instant(until)
        ),
        None => println!(
            "Instance {} {}",
            instance.id,
            color::status(&instance.state.to_string())
        ),
    }
}

async fn list(engine: &CliEngine, format: OutputFormat) -> Result<()> {
    let instances = engine.alarms().live_instances().await?;
    if format == OutputFormat::Json {
        return output::print_json(&instances);
    }
    if instances.is_empty() {
        println!("No pending alarms");
        return Ok(());
    }

    let now = engine.clock().now();
    let mut table = Table::new(vec![
        Column::plain("ID"),
        Column::plain("ALARM"),
        Column::plain("DUE"),
        Column::status("STATE"),
        Column::muted("LABEL"),
    ]);
    for instance in &instances {
        let due = output::instance_due(instance);
        table.row(vec![
            instance.id.to_string(),
            instance.alarm_id.to_string(),
            format!(
                "{} ({})",
                output::format_instant(due),
                output::format_fires_in(due, now)
            ),
            instance.state.to_string(),
            instance.label.clone(),
        ]);
    }
    table.render(&mut std::io::stdout());
    Ok(())
}
