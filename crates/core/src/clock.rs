// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Timers reconcile two time bases: a monotonic clock that counts from boot
//! (and keeps counting while suspended), and the wall clock, which the user or
//! the network can move at any time. Both are reported in milliseconds.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    /// Milliseconds since boot, including time spent suspended
    fn elapsed_realtime(&self) -> i64;

    /// Milliseconds since the Unix epoch
    fn wall_clock(&self) -> i64;

    /// Identity of the current boot, when the platform exposes one
    ///
    /// Two readings with different ids were taken in different boots, no
    /// matter how the boot clocks compare.
    fn boot_id(&self) -> Option<String> {
        None
    }
}

#[cfg(target_os = "linux")]
const BOOT_ID_PATH: &str = "/proc/sys/kernel/random/boot_id";

#[cfg(any(target_os = "linux", target_os = "android"))]
const BOOT_CLOCK: nix::time::ClockId = nix::time::ClockId::CLOCK_BOOTTIME;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const BOOT_CLOCK: nix::time::ClockId = nix::time::ClockId::CLOCK_MONOTONIC;

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn elapsed_realtime(&self) -> i64 {
        match nix::time::clock_gettime(BOOT_CLOCK) {
            Ok(ts) => ts.tv_sec() as i64 * 1000 + ts.tv_nsec() as i64 / 1_000_000,
            Err(e) => {
                tracing::error!(error = %e, "boot clock unavailable");
                0
            }
        }
    }

    fn wall_clock(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    #[cfg(target_os = "linux")]
    fn boot_id(&self) -> Option<String> {
        match std::fs::read_to_string(BOOT_ID_PATH) {
            Ok(id) => Some(id.trim().to_string()).filter(|id| !id.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "boot id unavailable");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FakeTime {
    elapsed: i64,
    wall: i64,
    boot: u32,
}

/// Fake clock for testing with controllable time
///
/// Starts ten seconds after boot on 2026-01-01T00:00:00Z.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub const START_ELAPSED: i64 = 10_000;
    pub const START_WALL: i64 = 1_767_225_600_000;

    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(FakeTime {
                elapsed: Self::START_ELAPSED,
                wall: Self::START_WALL,
                boot: 0,
            })),
        }
    }

    /// Advance both clocks by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let ms = duration.as_millis() as i64;
        current.elapsed += ms;
        current.wall += ms;
    }

    /// Move the wall clock only, as a manual time change would
    pub fn set_wall_clock(&self, wall: i64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.wall = wall;
    }

    /// Set the monotonic clock only
    pub fn set_elapsed_realtime(&self, elapsed: i64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.elapsed = elapsed;
    }

    /// Simulate a reboot: the machine is down for `downtime` and the boot
    /// clock restarts from zero.
    pub fn reboot(&self, downtime: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.wall += downtime.as_millis() as i64;
        current.elapsed = 0;
        current.boot += 1;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn elapsed_realtime(&self) -> i64 {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).elapsed
    }

    fn wall_clock(&self) -> i64 {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).wall
    }

    fn boot_id(&self) -> Option<String> {
        let boot = self.current.lock().unwrap_or_else(|e| e.into_inner()).boot;
        Some(format!("fake-boot-{}", boot))
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
