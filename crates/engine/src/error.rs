// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use thiserror::Error;
use tock_core::{InstanceError, TimerError};
use tock_storage::StoreError;

/// Errors reported to callers of the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    InvalidState(String),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("store error: {0}")]
    Store(StoreError),
}

impl EngineError {
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, EngineError::InvalidState(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound { .. })
    }
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { kind, id } => EngineError::NotFound { kind, id },
            other => EngineError::Store(other),
        }
    }
}

impl From<InstanceError> for EngineError {
    fn from(e: InstanceError) -> Self {
        EngineError::InvalidState(e.to_string())
    }
}

impl From<TimerError> for EngineError {
    fn from(e: TimerError) -> Self {
        match e {
            TimerError::InvalidState { .. } => EngineError::InvalidState(e.to_string()),
            TimerError::InvalidLength(_) => EngineError::InvalidArgument(e.to_string()),
        }
    }
}
