// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wake lock adapters
//!
//! Held while any timer rings so the machine does not suspend mid-alert.

mod inhibit;
mod noop;

pub use inhibit::InhibitWakeLock;
pub use noop::NoOpWakeLock;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWakeLock, WakeLockCall};

use thiserror::Error;

/// Errors from wake lock operations
#[derive(Debug, Error)]
pub enum WakeLockError {
    #[error("failed to acquire wake lock: {0}")]
    Acquire(#[source] std::io::Error),
    #[error("failed to release wake lock: {0}")]
    Release(#[source] std::io::Error),
    #[error("wake lock failed: {0}")]
    Failed(String),
}

/// Adapter keeping the machine awake
pub trait WakeLock: Send + 'static {
    /// Acquiring a held lock is a no-op
    fn acquire(&self) -> Result<(), WakeLockError>;

    /// Releasing a free lock is a no-op
    fn release(&self) -> Result<(), WakeLockError>;
}
