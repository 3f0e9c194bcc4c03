// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake wake lock for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{WakeLock, WakeLockError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Recorded wake lock call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeLockCall {
    Acquire,
    Release,
}

/// Fake wake lock for testing
#[derive(Clone, Default)]
pub struct FakeWakeLock {
    calls: Arc<Mutex<Vec<WakeLockCall>>>,
    held: Arc<AtomicBool>,
}

impl FakeWakeLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WakeLockCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }

    fn record(&self, call: WakeLockCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl WakeLock for FakeWakeLock {
    fn acquire(&self) -> Result<(), WakeLockError> {
        self.record(WakeLockCall::Acquire);
        self.held.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self) -> Result<(), WakeLockError> {
        self.record(WakeLockCall::Release);
        self.held.store(false, Ordering::SeqCst);
        Ok(())
    }
}
