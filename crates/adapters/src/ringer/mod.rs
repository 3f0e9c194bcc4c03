// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ringer adapters
//!
//! One ringer is shared by every expired timer. The model starts it when
//! the first timer expires and stops it when the last one leaves the
//! expired state.

mod command;
mod noop;

pub use command::CommandRinger;
pub use noop::NoOpRinger;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRinger, RingerCall};

use chime_core::TimerSettings;
use thiserror::Error;

/// Errors from ringer operations
#[derive(Debug, Error)]
pub enum RingerError {
    #[error("ringer command is empty")]
    EmptyCommand,
    #[error("failed to start player: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to stop player: {0}")]
    Kill(#[source] std::io::Error),
    #[error("ringer failed: {0}")]
    Failed(String),
}

/// Adapter for the sound (and vibration) of expired timers
pub trait Ringer: Send + 'static {
    /// Start ringing; starting an already ringing ringer restarts it
    fn start(&self, settings: &TimerSettings) -> Result<(), RingerError>;

    /// Stop ringing; stopping a silent ringer is fine
    fn stop(&self) -> Result<(), RingerError>;
}
