// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op wake scheduler for one-shot processes.

use super::{WakeError, WakeScheduler, WakeToken};

/// Wake scheduler that does nothing.
///
/// Used by the command line, where the daemon owns wake-ups.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpWakeScheduler;

impl NoOpWakeScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl WakeScheduler for NoOpWakeScheduler {
    fn schedule_exact_wake(&self, _at: i64, _token: WakeToken) -> Result<(), WakeError> {
        Ok(())
    }

    fn cancel_wake(&self, _token: WakeToken) -> Result<(), WakeError> {
        Ok(())
    }
}
