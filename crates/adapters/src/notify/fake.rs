// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notifier for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyError, TimerNotifier};
use chime_core::{PresenterId, Timer, TimerId};
use std::sync::{Arc, Mutex};

/// Recorded notification update, with the ids of the timers shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyCall {
    Unexpired(Vec<TimerId>),
    Missed(Vec<TimerId>),
    HeadsUp {
        presenter: PresenterId,
        timers: Vec<TimerId>,
    },
}

/// Fake notifier for testing
#[derive(Clone, Default)]
pub struct FakeNotifier {
    calls: Arc<Mutex<Vec<NotifyCall>>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Forget recorded calls
    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, call: NotifyCall) -> Result<(), NotifyError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        Ok(())
    }
}

fn ids(timers: &[Timer]) -> Vec<TimerId> {
    timers.iter().filter_map(|t| t.id).collect()
}

impl TimerNotifier for FakeNotifier {
    fn update_unexpired(&self, timers: &[Timer]) -> Result<(), NotifyError> {
        self.record(NotifyCall::Unexpired(ids(timers)))
    }

    fn update_missed(&self, timers: &[Timer]) -> Result<(), NotifyError> {
        self.record(NotifyCall::Missed(ids(timers)))
    }

    fn update_heads_up(
        &self,
        presenter: &PresenterId,
        expired: &[Timer],
    ) -> Result<(), NotifyError> {
        self.record(NotifyCall::HeadsUp {
            presenter: presenter.clone(),
            timers: ids(expired),
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
