// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tock scheduling engine

mod config;
mod engine;
pub mod env;
mod error;
mod executor;
mod locks;
mod scheduler;
mod timers;
mod wakeups;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineDeps, PollReport};
pub use error::EngineError;
pub use executor::Executor;
pub use locks::{KeyGuard, KeyedLocks, Ticket};
pub use scheduler::{AlarmScheduler, Applied, Edit};
pub use timers::TimerService;
pub use wakeups::WakeupQueue;
