// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer settings

use crate::ringtone::Ringtone;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How expired timers sound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    pub ringtone: Ringtone,
    /// Time for the ringer to ramp from silent to full volume
    #[serde(with = "humantime_serde")]
    pub crescendo: Duration,
    pub vibrate: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            ringtone: Ringtone::Default,
            crescendo: Duration::ZERO,
            vibrate: false,
        }
    }
}

impl TimerSettings {
    pub fn crescendo_ms(&self) -> i64 {
        self.crescendo.as_millis() as i64
    }
}
