// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake wake scheduler for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{WakeError, WakeScheduler, WakeToken};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Recorded wake scheduler call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WakeCall {
    Schedule { at: i64, token: WakeToken },
    Cancel { token: WakeToken },
}

/// Fake wake scheduler for testing
#[derive(Clone, Default)]
pub struct FakeWakeScheduler {
    calls: Arc<Mutex<Vec<WakeCall>>>,
    failing: Arc<AtomicBool>,
}

impl FakeWakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WakeCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The most recent call, if any
    pub fn last_call(&self) -> Option<WakeCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Make subsequent calls fail (they are still recorded)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record(&self, call: WakeCall) -> Result<(), WakeError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(WakeError::Failed("injected failure".to_string()));
        }
        Ok(())
    }
}

impl WakeScheduler for FakeWakeScheduler {
    fn schedule_exact_wake(&self, at: i64, token: WakeToken) -> Result<(), WakeError> {
        self.record(WakeCall::Schedule { at, token })
    }

    fn cancel_wake(&self, token: WakeToken) -> Result<(), WakeError> {
        self.record(WakeCall::Cancel { token })
    }
}
