// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock alarm` - alarm definitions

use anyhow::{bail, Result};
use chrono::Weekday;
use clap::{Args, Subcommand};
use serde::Serialize;
use tock_adapters::{CachedRingtoneTitles, FileNameLookup};
use tock_core::{Alarm, AlarmId, AlarmInstance, Alert, Clock, TimeOfDay, WeekPattern};
use tock_engine::Edit;

use crate::color;
use crate::output::{self, OutputFormat};
use crate::table::{Column, Table};
use crate::CliEngine;

#[derive(Args)]
pub struct AlarmArgs {
    #[command(subcommand)]
    pub command: AlarmCommand,
}

#[derive(Subcommand)]
pub enum AlarmCommand {
    /// Create an alarm
    Add {
        /// Time of day (HH:MM, 24-hour)
        time: TimeOfDay,
        /// Days to repeat on, e.g. mon,wed,fri (omit for a one-shot alarm)
        #[arg(long, value_delimiter = ',')]
        days: Vec<Weekday>,
        #[arg(long, default_value = "")]
        label: String,
        /// Ringtone URI, or "silent" (default: the last ringtone chosen)
        #[arg(long)]
        alert: Option<String>,
        #[arg(long)]
        no_vibrate: bool,
        /// Create the alarm switched off
        #[arg(long)]
        disabled: bool,
    },
    /// List alarms with their next firing
    List,
    /// Change an alarm
    Edit(EditArgs),
    /// Delete an alarm
    Delete { id: i64 },
    /// Restore the most recently deleted alarm
    Undo,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: i64,
    /// New time of day (HH:MM); also switches the alarm on
    #[arg(long)]
    pub time: Option<TimeOfDay>,
    #[arg(long)]
    pub label: Option<String>,
    /// Ringtone URI, or "silent"; becomes the default for new alarms
    #[arg(long)]
    pub alert: Option<String>,
    #[arg(long)]
    pub vibrate: Option<bool>,
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,
    #[arg(long)]
    pub disable: bool,
    /// Turn repeat on (restoring the previous days) or off
    #[arg(long)]
    pub repeat: Option<bool>,
    /// Flip the given days, e.g. sat,sun
    #[arg(long, value_delimiter = ',')]
    pub toggle_day: Vec<Weekday>,
}

#[derive(Serialize)]
struct AlarmEntry<'a> {
    #[serde(flatten)]
    alarm: &'a Alarm,
    #[serde(skip_serializing_if = "Option::is_none")]
    instance: Option<&'a AlarmInstance>,
}

pub async fn handle(command: AlarmCommand, engine: &CliEngine, format: OutputFormat) -> Result<()> {
    let alarms = engine.alarms();
    match command {
        AlarmCommand::Add {
            time,
            days,
            label,
            alert,
            no_vibrate,
            disabled,
        } => {
            let mut alarm = alarms.new_alarm(time).await?;
            alarm.days = WeekPattern::from_days(days);
            alarm.label = label;
            alarm.vibrate = !no_vibrate;
            alarm.enabled = !disabled;
            if let Some(alert) = alert {
                alarm.alert = Alert::parse(&alert);
            }
            let edit = alarms.add_alarm(alarm).await?;
            report(engine, &edit, format)
        }
        AlarmCommand::List => list(engine, format).await,
        AlarmCommand::Edit(args) => edit(engine, args, format).await,
        AlarmCommand::Delete { id } => {
            let alarm = alarms.on_alarm_deleted(AlarmId::new(id)).await?;
            match format {
                OutputFormat::Text => println!("Deleted alarm {} ({})", alarm.id, alarm.time),
                OutputFormat::Json => output::print_json(&alarm)?,
            }
            Ok(())
        }
        AlarmCommand::Undo => match alarms.undo_delete().await? {
            Some(edit) => report(engine, &edit, format),
            None => bail!("no deleted alarm to restore"),
        },
    }
}

async fn edit(engine: &CliEngine, args: EditArgs, format: OutputFormat) -> Result<()> {
    let alarms = engine.alarms();
    let id = AlarmId::new(args.id);
    let mut edits = Vec::new();

    if let Some(time) = args.time {
        edits.push(alarms.set_time(id, time).await?);
    }
    if let Some(label) = args.label {
        edits.push(alarms.set_label(id, label).await?);
    }
    if let Some(alert) = args.alert {
        edits.push(alarms.set_alert(id, Alert::parse(&alert)).await?);
    }
    if let Some(vibrate) = args.vibrate {
        edits.push(alarms.set_vibrate(id, vibrate).await?);
    }
    if args.enable || args.disable {
        edits.push(alarms.set_enabled(id, args.enable).await?);
    }
    if let Some(repeat) = args.repeat {
        edits.push(alarms.set_repeat(id, repeat).await?);
    }
    for day in args.toggle_day {
        edits.push(alarms.toggle_day(id, day).await?);
    }

    let next_fire_changed = edits.iter().any(|e| e.next_fire_changed);
    let Some(mut last) = edits.pop() else {
        bail!("nothing to change for alarm {}", id);
    };
    last.next_fire_changed = next_fire_changed;
    report(engine, &last, format)
}

fn report(engine: &CliEngine, edit: &Edit, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let alarm = &edit.alarm;
            let mut line = format!(
                "Alarm {}: {} {} {}",
                alarm.id,
                alarm.time,
                alarm.days.summary(engine.config().first_day_of_week),
                output::enabled_cell(alarm.enabled)
            );
            if !alarm.label.is_empty() {
                line.push_str(&format!(" {}", color::muted(&alarm.label)));
            }
            println!("{line}");
            if edit.next_fire_changed {
                if let Some(instance) = edit.applied.instance() {
                    let now = engine.clock().now();
                    println!(
                        "{}",
                        output::fire_message(alarm.id.get(), output::instance_due(instance), now)
                    );
                }
            }
        }
        OutputFormat::Json => output::print_json(&AlarmEntry {
            alarm: &edit.alarm,
            instance: edit.applied.instance(),
        })?,
    }
    Ok(())
}

async fn list(engine: &CliEngine, format: OutputFormat) -> Result<()> {
    let alarms = engine.alarms();
    let mut rows = Vec::new();
    for alarm in alarms.alarms().await? {
        let instance = alarms.live_instance(alarm.id).await?;
        rows.push((alarm, instance));
    }

    if format == OutputFormat::Json {
        let entries: Vec<_> = rows
            .iter()
            .map(|(alarm, instance)| AlarmEntry {
                alarm,
                instance: instance.as_ref(),
            })
            .collect();
        return output::print_json(&entries);
    }

    if rows.is_empty() {
        println!("No alarms");
        return Ok(());
    }

    let now = engine.clock().now();
    let first_day = engine.config().first_day_of_week;
    let titles = CachedRingtoneTitles::new(FileNameLookup);
    let mut table = Table::new(vec![
        Column::plain("ID"),
        Column::plain("TIME"),
        Column::plain("DAYS"),
        Column::status("ON"),
        Column::plain("NEXT"),
        Column::status("STATE"),
        Column::plain("ALERT").with_max(24),
        Column::muted("LABEL"),
    ]);
    for (alarm, instance) in &rows {
        let (next, state) = match instance {
            Some(instance) => {
                let due = output::instance_due(instance);
                (
                    format!(
                        "{} ({})",
                        output::format_instant(due),
                        output::format_fires_in(due, now)
                    ),
                    instance.state.to_string(),
                )
            }
            None => ("-".to_string(), "-".to_string()),
        };
        let days = if alarm.is_repeating() {
            alarm.days.summary(first_day)
        } else if alarms.is_tomorrow(alarm) {
            "tomorrow".to_string()
        } else {
            "today".to_string()
        };
        table.row(vec![
            alarm.id.to_string(),
            alarm.time.to_string(),
            days,
            output::enabled_cell(alarm.enabled).to_string(),
            next,
            state,
            titles.title(&alarm.alert).unwrap_or_else(|| alarm.alert.to_string()),
            alarm.label.clone(),
        ]);
    }
    table.render(&mut std::io::stdout());
    Ok(())
}
