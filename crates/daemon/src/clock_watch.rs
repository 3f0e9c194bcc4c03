// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detection of reboots and wall clock changes
//!
//! Each boot carries an identity, and the difference between the wall clock
//! and the boot clock only moves when someone sets the time. The readings are
//! kept in the store so a restarted daemon can tell what happened while it
//! was down. Without a boot identity, a boot clock that went backwards is
//! the only sign of a reboot.

use chime_core::Clock;
use chime_storage::{PrefValue, Prefs};

pub const LAST_ELAPSED_KEY: &str = "clock_last_elapsed";
pub const BOOT_OFFSET_KEY: &str = "clock_boot_offset";
pub const BOOT_ID_KEY: &str = "clock_boot_id";

/// Offset drift tolerated as scheduling jitter (ms)
pub const TIME_SET_TOLERANCE: i64 = 1_000;

/// What happened to the clocks since the previous observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockChange {
    Steady,
    Reboot,
    TimeSet,
}

/// Last observed clock readings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockWatch {
    last_elapsed: Option<i64>,
    boot_offset: Option<i64>,
    boot_id: Option<String>,
}

impl ClockWatch {
    pub fn load(prefs: &impl Prefs) -> Self {
        let int = |key: &str| match prefs.get(key) {
            Some(PrefValue::Int(v)) => Some(v),
            _ => None,
        };
        Self {
            last_elapsed: int(LAST_ELAPSED_KEY),
            boot_offset: int(BOOT_OFFSET_KEY),
            boot_id: match prefs.get(BOOT_ID_KEY) {
                Some(PrefValue::Str(id)) => Some(id),
                _ => None,
            },
        }
    }

    /// Stage the readings; the caller commits
    pub fn save(&self, prefs: &mut impl Prefs) {
        if let Some(elapsed) = self.last_elapsed {
            prefs.put(LAST_ELAPSED_KEY, PrefValue::Int(elapsed));
        }
        if let Some(offset) = self.boot_offset {
            prefs.put(BOOT_OFFSET_KEY, PrefValue::Int(offset));
        }
        if let Some(id) = &self.boot_id {
            prefs.put(BOOT_ID_KEY, PrefValue::Str(id.clone()));
        }
    }

    /// Compare the clocks against the previous readings and remember them
    ///
    /// A reboot takes precedence over a time change, since the offset always
    /// moves across a reboot.
    pub fn observe(&mut self, clock: &impl Clock) -> ClockChange {
        let elapsed = clock.elapsed_realtime();
        let offset = clock.wall_clock() - elapsed;
        let boot_id = clock.boot_id();

        let rebooted = match (&self.boot_id, &boot_id) {
            (Some(previous), Some(current)) => previous != current,
            _ => self.last_elapsed.is_some_and(|last| elapsed < last),
        };
        let change = match self.boot_offset {
            _ if rebooted => ClockChange::Reboot,
            Some(previous) if (offset - previous).abs() > TIME_SET_TOLERANCE => {
                ClockChange::TimeSet
            }
            _ => ClockChange::Steady,
        };

        self.last_elapsed = Some(elapsed);
        self.boot_offset = Some(offset);
        if boot_id.is_some() {
            self.boot_id = boot_id;
        }
        change
    }
}

#[cfg(test)]
#[path = "clock_watch_tests.rs"]
mod tests;
