// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer notification adapters
//!
//! Each method replaces everything previously posted for its category. An
//! empty slice clears the category.

mod desktop;
mod noop;

pub use desktop::{DesktopBackend, DesktopNotifier};
pub use noop::NoOpNotifier;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifier, NotifyCall};

use chime_core::{PresenterId, Timer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Failed(String),
    #[error("{backend} error: {stderr}")]
    Backend { backend: &'static str, stderr: String },
}

/// Adapter for timer notifications
pub trait TimerNotifier: Send + 'static {
    /// Running and paused timers, most urgent first
    fn update_unexpired(&self, timers: &[Timer]) -> Result<(), NotifyError>;

    /// Missed timers, most urgent first
    fn update_missed(&self, timers: &[Timer]) -> Result<(), NotifyError>;

    /// Expired timers shown by `presenter`; an empty slice tears the
    /// heads-up down
    fn update_heads_up(&self, presenter: &PresenterId, expired: &[Timer])
        -> Result<(), NotifyError>;
}
