// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects the host needs to perform

use crate::id::{AlarmId, InstanceId, TimerId};
use crate::instance::InstanceState;
use crate::timer::TimerState;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Record of one alarm-instance state change, handed to notifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub instance_id: InstanceId,
    pub alarm_id: AlarmId,
    pub from: InstanceState,
    pub to: InstanceState,
    /// Instant the transition took effect
    pub at: NaiveDateTime,
}

/// Record of one timer state change, handed to notifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerTransition {
    pub timer_id: TimerId,
    pub from: TimerState,
    pub to: TimerState,
    pub at: NaiveDateTime,
}

/// Effects that need to be executed by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Hand an instance transition to the notification layer
    Notify { transition: Transition },

    /// Hand a timer transition to the notification layer
    NotifyTimer { transition: TimerTransition },

    /// Arm a wakeup for the instance's next time-driven transition
    ScheduleWakeup {
        instance_id: InstanceId,
        at: NaiveDateTime,
    },

    /// Drop any pending wakeup for the instance
    CancelWakeup { instance_id: InstanceId },
}

impl Effect {
    /// Short name for log output.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Notify { .. } => "notify",
            Effect::NotifyTimer { .. } => "notify_timer",
            Effect::ScheduleWakeup { .. } => "schedule_wakeup",
            Effect::CancelWakeup { .. } => "cancel_wakeup",
        }
    }

    /// Key-value pairs for structured log output.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Notify { transition } => vec![
                ("instance_id", transition.instance_id.to_string()),
                ("alarm_id", transition.alarm_id.to_string()),
                ("from", transition.from.to_string()),
                ("to", transition.to.to_string()),
            ],
            Effect::NotifyTimer { transition } => vec![
                ("timer_id", transition.timer_id.to_string()),
                ("from", transition.from.to_string()),
                ("to", transition.to.to_string()),
            ],
            Effect::ScheduleWakeup { instance_id, at } => vec![
                ("instance_id", instance_id.to_string()),
                ("at", at.to_string()),
            ],
            Effect::CancelWakeup { instance_id } => {
                vec![("instance_id", instance_id.to_string())]
            }
        }
    }

    /// The instance transition carried by a `Notify` effect.
    pub fn transition(&self) -> Option<&Transition> {
        match self {
            Effect::Notify { transition } => Some(transition),
            _ => None,
        }
    }

    /// The timer transition carried by a `NotifyTimer` effect.
    pub fn timer_transition(&self) -> Option<&TimerTransition> {
        match self {
            Effect::NotifyTimer { transition } => Some(transition),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
