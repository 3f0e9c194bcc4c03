// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the timer model

use chime_core::TimerId;
use chime_storage::StorageError;
use thiserror::Error;

/// Errors that can occur in the timer model
#[derive(Debug, Error)]
pub enum ModelError {
    /// The caller referred to a timer the model does not track
    #[error("unknown timer: {0}")]
    UnknownTimer(TimerId),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
