// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown timer state machine
//!
//! A [`Timer`] is an immutable snapshot. Every transition returns a new
//! snapshot and leaves the receiver untouched; transitions that make no sense
//! in the current state return an unchanged copy.
//!
//! ## Time bases
//!
//! `last_start_time` is read from the monotonic boot clock and
//! `last_wall_clock_time` from the wall clock at the same instant. The boot
//! clock drives countdown arithmetic. The wall clock is only consulted to
//! recover accumulated time after a reboot, when the boot clock restarts.

use crate::clock::Clock;
use crate::id::TimerId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One minute in milliseconds
pub const MINUTE: i64 = 60_000;

/// Shortest length a timer may be edited to
pub const MIN_LENGTH: i64 = 1_000;

/// Longest length the timer setup accepts: 99h 99m 99s
pub const MAX_LENGTH: i64 = 99 * 3_600_000 + 99 * MINUTE + 99 * 1_000;

/// A running timer this far past zero after a reboot is considered missed
pub const MISSED_THRESHOLD: i64 = -MINUTE;

/// The state of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Running,
    Paused,
    Expired,
    Reset,
    Missed,
}

impl TimerState {
    /// Persisted ordinal
    pub fn ordinal(self) -> i64 {
        match self {
            TimerState::Running => 1,
            TimerState::Paused => 2,
            TimerState::Expired => 3,
            TimerState::Reset => 4,
            TimerState::Missed => 5,
        }
    }

    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            1 => Some(TimerState::Running),
            2 => Some(TimerState::Paused),
            3 => Some(TimerState::Expired),
            4 => Some(TimerState::Reset),
            5 => Some(TimerState::Missed),
            _ => None,
        }
    }

    /// Rank used when ordering by urgency: missed first, reset last
    fn urgency_rank(self) -> u8 {
        match self {
            TimerState::Missed => 0,
            TimerState::Expired => 1,
            TimerState::Running => 2,
            TimerState::Paused => 3,
            TimerState::Reset => 4,
        }
    }

    /// States in which the countdown keeps moving
    fn is_ticking(self) -> bool {
        matches!(
            self,
            TimerState::Running | TimerState::Expired | TimerState::Missed
        )
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Expired => "expired",
            TimerState::Reset => "reset",
            TimerState::Missed => "missed",
        };
        write!(f, "{}", s)
    }
}

/// A countdown timer snapshot
///
/// Structural equality compares every field and answers "did anything
/// change"; use [`Timer::same_timer`] to compare identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Assigned by the store on first insert
    pub id: Option<TimerId>,
    pub state: TimerState,
    /// Requested duration in ms
    pub length: i64,
    /// `length` plus any time added by the user
    pub total_length: i64,
    /// Boot clock reading of the last transition into a ticking state
    pub last_start_time: Option<i64>,
    /// Wall clock reading paired with `last_start_time`
    pub last_wall_clock_time: Option<i64>,
    /// Remaining time as of `last_start_time`
    pub last_remaining_time: i64,
    pub label: Option<String>,
    /// One-shot timers are deleted instead of reset once they complete
    pub delete_after_use: bool,
}

impl Timer {
    /// Create a new timer in the Reset state
    pub fn new(length: i64, label: Option<String>, delete_after_use: bool) -> Self {
        Self {
            id: None,
            state: TimerState::Reset,
            length,
            total_length: length,
            last_start_time: None,
            last_wall_clock_time: None,
            last_remaining_time: length,
            label,
            delete_after_use,
        }
    }

    pub fn with_id(self, id: TimerId) -> Self {
        Timer {
            id: Some(id),
            ..self
        }
    }

    /// True when both snapshots describe the same logical timer
    pub fn same_timer(&self, other: &Timer) -> bool {
        self.id.is_some() && self.id == other.id
    }

    pub fn is_reset(&self) -> bool {
        self.state == TimerState::Reset
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    pub fn is_missed(&self) -> bool {
        self.state == TimerState::Missed
    }

    /// Remaining time at the clock's current instant
    ///
    /// Never increases while the timer ticks: a boot clock reading earlier
    /// than `last_start_time` counts as zero elapsed time.
    pub fn remaining_time(&self, clock: &impl Clock) -> i64 {
        if !self.state.is_ticking() {
            return self.last_remaining_time;
        }
        let since_start = self
            .last_start_time
            .map(|start| clock.elapsed_realtime() - start)
            .unwrap_or(0);
        self.last_remaining_time - since_start.max(0)
    }

    /// Boot clock instant at which the countdown reaches zero
    pub fn expiration_time(&self) -> Option<i64> {
        if !self.state.is_ticking() {
            return None;
        }
        self.last_start_time
            .map(|start| start + self.last_remaining_time)
    }

    /// Wall clock instant at which the countdown reaches zero
    pub fn wall_clock_expiration_time(&self) -> Option<i64> {
        if !self.state.is_ticking() {
            return None;
        }
        self.last_wall_clock_time
            .map(|wall| wall + self.last_remaining_time)
    }

    pub fn elapsed_time(&self, clock: &impl Clock) -> i64 {
        self.total_length - self.remaining_time(clock)
    }

    /// Start a reset timer or resume a paused one
    pub fn start(&self, clock: &impl Clock) -> Timer {
        if self.state.is_ticking() {
            return self.clone();
        }
        Timer {
            state: TimerState::Running,
            last_start_time: Some(clock.elapsed_realtime()),
            last_wall_clock_time: Some(clock.wall_clock()),
            ..self.clone()
        }
    }

    /// Pause a running timer; an expired or missed timer is reset instead
    pub fn pause(&self, clock: &impl Clock) -> Timer {
        match self.state {
            TimerState::Paused | TimerState::Reset => self.clone(),
            TimerState::Expired | TimerState::Missed => self.reset(),
            TimerState::Running => Timer {
                state: TimerState::Paused,
                last_start_time: None,
                last_wall_clock_time: None,
                last_remaining_time: self.remaining_time(clock),
                ..self.clone()
            },
        }
    }

    pub fn expire(&self, clock: &impl Clock) -> Timer {
        match self.state {
            TimerState::Expired | TimerState::Reset | TimerState::Missed => self.clone(),
            TimerState::Running | TimerState::Paused => self.finish(TimerState::Expired, clock),
        }
    }

    pub fn miss(&self, clock: &impl Clock) -> Timer {
        match self.state {
            TimerState::Reset | TimerState::Missed => self.clone(),
            _ => self.finish(TimerState::Missed, clock),
        }
    }

    fn finish(&self, state: TimerState, clock: &impl Clock) -> Timer {
        Timer {
            state,
            total_length: 0,
            last_start_time: Some(clock.elapsed_realtime()),
            last_wall_clock_time: Some(clock.wall_clock()),
            last_remaining_time: self.last_remaining_time.min(0),
            ..self.clone()
        }
    }

    pub fn reset(&self) -> Timer {
        if self.is_reset() {
            return self.clone();
        }
        Timer {
            state: TimerState::Reset,
            total_length: self.length,
            last_start_time: None,
            last_wall_clock_time: None,
            last_remaining_time: self.length,
            ..self.clone()
        }
    }

    /// Re-base timestamps after the boot clock restarted
    ///
    /// The wall clock is the only time base that survives a reboot, so the
    /// downtime is measured there. A wall clock that moved backwards counts as
    /// no downtime.
    pub fn update_after_reboot(&self, clock: &impl Clock) -> Timer {
        if matches!(self.state, TimerState::Reset | TimerState::Paused) {
            return self.clone();
        }
        let wall_now = clock.wall_clock();
        let delta = self
            .last_wall_clock_time
            .map(|wall| (wall_now - wall).max(0))
            .unwrap_or(0);
        Timer {
            last_start_time: Some(clock.elapsed_realtime()),
            last_wall_clock_time: Some(wall_now),
            last_remaining_time: self.last_remaining_time - delta,
            ..self.clone()
        }
    }

    /// Re-base timestamps after the wall clock was changed
    ///
    /// A boot clock reading earlier than `last_start_time` means a reboot has
    /// not been reconciled yet; the timer is left for
    /// [`Timer::update_after_reboot`].
    pub fn update_after_time_set(&self, clock: &impl Clock) -> Timer {
        if matches!(self.state, TimerState::Reset | TimerState::Paused) {
            return self.clone();
        }
        let now = clock.elapsed_realtime();
        let delta = now - self.last_start_time.unwrap_or(now);
        if delta < 0 {
            return self.clone();
        }
        Timer {
            last_start_time: Some(now),
            last_wall_clock_time: Some(clock.wall_clock()),
            last_remaining_time: self.last_remaining_time - delta,
            ..self.clone()
        }
    }

    pub fn set_label(&self, label: Option<String>) -> Timer {
        if self.label == label {
            return self.clone();
        }
        Timer {
            label,
            ..self.clone()
        }
    }

    /// Change the requested length; a reset timer also takes it as its
    /// remaining time
    pub fn set_length(&self, length: i64) -> Timer {
        if self.length == length || length <= MIN_LENGTH {
            return self.clone();
        }
        if self.is_reset() {
            Timer {
                length,
                total_length: length,
                last_remaining_time: length,
                ..self.clone()
            }
        } else {
            Timer {
                length,
                ..self.clone()
            }
        }
    }

    /// Set the remaining time, growing or shrinking `total_length` to match
    ///
    /// This is the only way an expired or missed timer returns to Running.
    pub fn set_remaining_time(&self, remaining: i64, clock: &impl Clock) -> Timer {
        if self.last_remaining_time == remaining || self.is_reset() {
            return self.clone();
        }
        let delta = remaining - self.last_remaining_time;
        let total_length = self.total_length + delta;

        if remaining > 0 && (self.is_expired() || self.is_missed()) {
            Timer {
                state: TimerState::Running,
                total_length,
                last_start_time: Some(clock.elapsed_realtime()),
                last_wall_clock_time: Some(clock.wall_clock()),
                last_remaining_time: remaining,
                ..self.clone()
            }
        } else {
            Timer {
                total_length,
                last_remaining_time: remaining,
                ..self.clone()
            }
        }
    }

    /// Add a minute; an expired or missed timer restarts with one minute left
    pub fn add_minute(&self, clock: &impl Clock) -> Timer {
        if self.is_expired() || self.is_missed() {
            self.set_remaining_time(MINUTE, clock)
        } else {
            self.set_remaining_time(self.last_remaining_time + MINUTE, clock)
        }
    }
}

/// Newest timers first
pub fn by_id_desc(a: &Timer, b: &Timer) -> Ordering {
    b.id.cmp(&a.id)
}

/// Most urgent timers first: missed, expired, running, paused, reset
///
/// Within a state, less remaining time sorts first. Reset timers compare by
/// length.
pub fn by_expiry(a: &Timer, b: &Timer) -> Ordering {
    let rank = a.state.urgency_rank().cmp(&b.state.urgency_rank());
    if rank != Ordering::Equal {
        return rank;
    }
    if a.is_reset() {
        a.length.cmp(&b.length)
    } else {
        a.last_remaining_time.cmp(&b.last_remaining_time)
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
