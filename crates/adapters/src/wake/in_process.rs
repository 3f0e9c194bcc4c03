// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wake scheduler serviced by the owning process's event loop

use super::{WakeError, WakeScheduler, WakeToken};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Records armed wake requests for an event loop to sleep on
///
/// Clones share state: hand one to the model and keep one in the loop.
#[derive(Clone, Default)]
pub struct InProcessWakeScheduler {
    armed: Arc<Mutex<BTreeMap<WakeToken, i64>>>,
}

impl InProcessWakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boot clock time the request for `token` is armed at
    pub fn armed(&self, token: WakeToken) -> Option<i64> {
        self.armed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&token)
            .copied()
    }

    /// Earliest armed request across all tokens
    pub fn next_wake(&self) -> Option<i64> {
        self.armed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .min()
            .copied()
    }
}

impl WakeScheduler for InProcessWakeScheduler {
    fn schedule_exact_wake(&self, at: i64, token: WakeToken) -> Result<(), WakeError> {
        self.armed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token, at);
        Ok(())
    }

    fn cancel_wake(&self, token: WakeToken) -> Result<(), WakeError> {
        self.armed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&token);
        Ok(())
    }
}
