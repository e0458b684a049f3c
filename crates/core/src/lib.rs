// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tock-core: alarm, instance, and timer models for the tock alarm clock

pub mod alarm;
pub mod clock;
pub mod effect;
pub mod id;
pub mod instance;
pub mod time_fmt;
pub mod timer;
pub mod trigger;
pub mod week;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use alarm::{Alarm, AlarmChange, Alert, DEFAULT_ALERT_URI};
pub use clock::{Clock, ClockSkew, FakeClock, SystemClock};
pub use effect::{Effect, TimerTransition, Transition};
pub use id::{AlarmId, InstanceId, TimerId, INVALID_ID};
pub use instance::{AlarmInstance, InstanceAction, InstanceError, InstanceState, InstanceTimings};
pub use time_fmt::{format_countdown, format_span};
pub use timer::{Timer, TimerAction, TimerError, TimerState};
pub use trigger::{next_trigger, next_trigger_after, TimeOfDay, TimeOfDayError};
pub use week::WeekPattern;
