// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chimed internals: lifecycle and clock reconciliation

pub mod clock_watch;
pub mod lifecycle;

pub use clock_watch::{ClockChange, ClockWatch};
pub use lifecycle::{startup, startup_with_clock, Config, DaemonState, LifecycleError};
