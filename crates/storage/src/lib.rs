// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for tock

mod error;
mod snapshot;
mod state;
mod store;

pub use error::StoreError;
pub use snapshot::{Snapshot, CURRENT_SNAPSHOT_VERSION};
pub use state::{Settings, StoreState};
pub use store::{MemoryStore, Store};
