// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake ringer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Ringer, RingerError};
use chime_core::{Ringtone, TimerSettings};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Recorded ringer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingerCall {
    Start { ringtone: Ringtone, crescendo_ms: i64 },
    Stop,
}

/// Fake ringer for testing
#[derive(Clone, Default)]
pub struct FakeRinger {
    calls: Arc<Mutex<Vec<RingerCall>>>,
    ringing: Arc<AtomicBool>,
    failing: Arc<AtomicBool>,
}

impl FakeRinger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RingerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn start_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RingerCall::Start { .. }))
            .count()
    }

    pub fn stop_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RingerCall::Stop))
            .count()
    }

    pub fn is_ringing(&self) -> bool {
        self.ringing.load(Ordering::SeqCst)
    }

    /// Make subsequent calls fail (they are still recorded)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record(&self, call: RingerCall) -> Result<(), RingerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(RingerError::Failed("injected failure".to_string()));
        }
        Ok(())
    }
}

impl Ringer for FakeRinger {
    fn start(&self, settings: &TimerSettings) -> Result<(), RingerError> {
        self.record(RingerCall::Start {
            ringtone: settings.ringtone.clone(),
            crescendo_ms: settings.crescendo_ms(),
        })?;
        self.ringing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Result<(), RingerError> {
        self.record(RingerCall::Stop)?;
        self.ringing.store(false, Ordering::SeqCst);
        Ok(())
    }
}
