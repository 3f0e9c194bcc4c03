// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the facilities timers depend on: exact wake-ups, the
//! ringer, wake locks and notifications

pub mod notify;
pub mod ringer;
pub mod traced;
pub mod wake;
pub mod wake_lock;

pub use notify::{DesktopBackend, DesktopNotifier, NoOpNotifier, NotifyError, TimerNotifier};
pub use ringer::{CommandRinger, NoOpRinger, Ringer, RingerError};
pub use traced::{TracedNotifier, TracedRinger, TracedWakeLock, TracedWakeScheduler};
pub use wake::{InProcessWakeScheduler, NoOpWakeScheduler, WakeError, WakeScheduler, WakeToken};
pub use wake_lock::{InhibitWakeLock, NoOpWakeLock, WakeLock, WakeLockError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifier, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use ringer::{FakeRinger, RingerCall};
#[cfg(any(test, feature = "test-support"))]
pub use wake::{FakeWakeScheduler, WakeCall};
#[cfg(any(test, feature = "test-support"))]
pub use wake_lock::{FakeWakeLock, WakeLockCall};
