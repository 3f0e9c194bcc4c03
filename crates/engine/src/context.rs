// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit dependencies of the timer model

use chime_adapters::{
    NoOpNotifier, NoOpRinger, NoOpWakeLock, NoOpWakeScheduler, Ringer, TimerNotifier, WakeLock,
    WakeScheduler,
};
use chime_core::{Clock, TimerSettings};

/// Clock, settings and adapters shared by every timer operation
///
/// Built once by the binary and handed to [`crate::TimerModel::new`].
/// Adapters default to no-ops.
pub struct ChimeContext<C> {
    pub clock: C,
    pub settings: TimerSettings,
    pub wake: Box<dyn WakeScheduler>,
    pub ringer: Box<dyn Ringer>,
    pub wake_lock: Box<dyn WakeLock>,
    pub notifier: Box<dyn TimerNotifier>,
}

impl<C: Clock> ChimeContext<C> {
    pub fn new(clock: C, settings: TimerSettings) -> Self {
        Self {
            clock,
            settings,
            wake: Box::new(NoOpWakeScheduler::new()),
            ringer: Box::new(NoOpRinger::new()),
            wake_lock: Box::new(NoOpWakeLock::new()),
            notifier: Box::new(NoOpNotifier::new()),
        }
    }

    pub fn with_wake_scheduler(mut self, wake: impl WakeScheduler) -> Self {
        self.wake = Box::new(wake);
        self
    }

    pub fn with_ringer(mut self, ringer: impl Ringer) -> Self {
        self.ringer = Box::new(ringer);
        self
    }

    pub fn with_wake_lock(mut self, wake_lock: impl WakeLock) -> Self {
        self.wake_lock = Box::new(wake_lock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl TimerNotifier) -> Self {
        self.notifier = Box::new(notifier);
        self
    }
}
