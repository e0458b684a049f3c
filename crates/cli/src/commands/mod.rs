// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod alarm;
pub mod instance;
pub mod timer;
pub mod watch;
