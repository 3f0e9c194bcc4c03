// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exact wake-up scheduling adapters

mod in_process;
mod noop;

pub use in_process::InProcessWakeScheduler;
pub use noop::NoOpWakeScheduler;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWakeScheduler, WakeCall};

use std::fmt;
use thiserror::Error;

/// Errors from wake scheduling
#[derive(Debug, Error)]
pub enum WakeError {
    #[error("wake scheduling failed: {0}")]
    Failed(String),
}

/// Stable identity of a wake request; re-arming with the same token replaces
/// the earlier request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WakeToken(pub &'static str);

impl WakeToken {
    /// The single request that fires when the next timer expires
    pub const TIMER_EXPIRY: WakeToken = WakeToken("timer-expiry");
}

impl fmt::Display for WakeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Adapter for waking the process at an exact boot clock instant
pub trait WakeScheduler: Send + 'static {
    /// Arm (or re-arm) the request for `token` at boot clock time `at` ms
    fn schedule_exact_wake(&self, at: i64, token: WakeToken) -> Result<(), WakeError>;

    /// Withdraw the request for `token`; cancelling an unarmed token is fine
    fn cancel_wake(&self, token: WakeToken) -> Result<(), WakeError>;
}
