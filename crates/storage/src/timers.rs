// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer persistence
//!
//! Each timer is a group of keys suffixed with its id. `timers_list` holds
//! the ids of live timers and `next_timer_id` the next id to hand out.

use crate::prefs::{PrefValue, Prefs, StorageError};
use chime_core::{Timer, TimerId, TimerState};
use std::collections::BTreeSet;

const TIMER_IDS: &str = "timers_list";
const NEXT_TIMER_ID: &str = "next_timer_id";
const STATE: &str = "timer_state_";
const LENGTH: &str = "timer_setup_timet_";
const TOTAL_LENGTH: &str = "timer_original_timet_";
const LAST_START_TIME: &str = "timer_start_time_";
const LAST_WALL_CLOCK_TIME: &str = "timer_wall_clock_time_";
const REMAINING_TIME: &str = "timer_time_left_";
const LABEL: &str = "timer_label_";
const DELETE_AFTER_USE: &str = "delete_after_use_";

/// Stored in place of an absent timestamp
const UNUSED: i64 = i64::MIN;

fn key(prefix: &str, id: TimerId) -> String {
    format!("{}{}", prefix, id)
}

/// Maps timers onto a key-value backing
pub struct TimerStore<P> {
    prefs: P,
}

impl<P: Prefs> TimerStore<P> {
    pub fn new(prefs: P) -> Self {
        Self { prefs }
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut P {
        &mut self.prefs
    }

    /// Pick up changes committed by other processes
    pub fn reload(&mut self) -> Result<(), StorageError> {
        self.prefs.reload()
    }

    /// All stored timers in ascending id order
    ///
    /// Records with an unrecognized state are skipped.
    pub fn timers(&self) -> Vec<Timer> {
        let mut ids: Vec<TimerId> = self
            .prefs
            .get_set(TIMER_IDS)
            .iter()
            .filter_map(|raw| match raw.parse::<TimerId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::warn!(raw = %raw, "skipping malformed timer id");
                    None
                }
            })
            .collect();
        ids.sort();
        ids.into_iter().filter_map(|id| self.load(id)).collect()
    }

    fn load(&self, id: TimerId) -> Option<Timer> {
        let ordinal = self.prefs.get_int(&key(STATE, id), 0);
        let Some(state) = TimerState::from_ordinal(ordinal) else {
            tracing::warn!(timer_id = %id, ordinal, "skipping timer with unknown state");
            return None;
        };
        let timestamp = |prefix: &str| {
            Some(self.prefs.get_int(&key(prefix, id), UNUSED)).filter(|&t| t != UNUSED)
        };
        Some(Timer {
            id: Some(id),
            state,
            length: self.prefs.get_int(&key(LENGTH, id), 0),
            total_length: self.prefs.get_int(&key(TOTAL_LENGTH, id), 0),
            last_start_time: timestamp(LAST_START_TIME),
            last_wall_clock_time: timestamp(LAST_WALL_CLOCK_TIME),
            last_remaining_time: self.prefs.get_int(&key(REMAINING_TIME, id), 0),
            label: self.prefs.get_string(&key(LABEL, id)),
            delete_after_use: self.prefs.get_bool(&key(DELETE_AFTER_USE, id), false),
        })
    }

    /// Persist a new timer and return it with its assigned id
    pub fn insert(&mut self, timer: &Timer) -> Result<Timer, StorageError> {
        let next = self.prefs.get_int(NEXT_TIMER_ID, 0).max(0);
        let id = TimerId(u32::try_from(next).unwrap_or(u32::MAX));
        self.prefs.put(NEXT_TIMER_ID, PrefValue::Int(next + 1));

        let mut ids = self.prefs.get_set(TIMER_IDS);
        ids.insert(id.to_string());
        self.prefs.put(TIMER_IDS, PrefValue::Set(ids));

        let timer = timer.clone().with_id(id);
        self.write(id, &timer);
        self.commit()?;
        tracing::debug!(timer_id = %id, "timer inserted");
        Ok(timer)
    }

    /// Overwrite a stored timer
    pub fn update(&mut self, timer: &Timer) -> Result<(), StorageError> {
        let id = timer.id.ok_or(StorageError::MissingId)?;
        self.write(id, timer);
        self.commit()
    }

    /// Delete a timer and its keys
    pub fn remove(&mut self, id: TimerId) -> Result<(), StorageError> {
        let mut ids: BTreeSet<String> = self.prefs.get_set(TIMER_IDS);
        ids.remove(&id.to_string());
        if ids.is_empty() {
            self.prefs.remove(TIMER_IDS);
            self.prefs.remove(NEXT_TIMER_ID);
        } else {
            self.prefs.put(TIMER_IDS, PrefValue::Set(ids));
        }
        for prefix in [
            STATE,
            LENGTH,
            TOTAL_LENGTH,
            LAST_START_TIME,
            LAST_WALL_CLOCK_TIME,
            REMAINING_TIME,
            LABEL,
            DELETE_AFTER_USE,
        ] {
            self.prefs.remove(&key(prefix, id));
        }
        self.commit()?;
        tracing::debug!(timer_id = %id, "timer removed");
        Ok(())
    }

    /// Commit, leaving nothing staged behind if the backing fails
    fn commit(&mut self) -> Result<(), StorageError> {
        let result = self.prefs.commit();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "commit failed; dropping staged timer edits");
            self.prefs.discard();
        }
        result
    }

    fn write(&mut self, id: TimerId, timer: &Timer) {
        let p = &mut self.prefs;
        p.put(&key(STATE, id), PrefValue::Int(timer.state.ordinal()));
        p.put(&key(LENGTH, id), PrefValue::Int(timer.length));
        p.put(&key(TOTAL_LENGTH, id), PrefValue::Int(timer.total_length));
        p.put(
            &key(LAST_START_TIME, id),
            PrefValue::Int(timer.last_start_time.unwrap_or(UNUSED)),
        );
        p.put(
            &key(LAST_WALL_CLOCK_TIME, id),
            PrefValue::Int(timer.last_wall_clock_time.unwrap_or(UNUSED)),
        );
        p.put(
            &key(REMAINING_TIME, id),
            PrefValue::Int(timer.last_remaining_time),
        );
        match &timer.label {
            Some(label) => p.put(&key(LABEL, id), PrefValue::Str(label.clone())),
            None => p.remove(&key(LABEL, id)),
        }
        if timer.delete_after_use {
            p.put(&key(DELETE_AFTER_USE, id), PrefValue::Bool(true));
        } else {
            p.remove(&key(DELETE_AFTER_USE, id));
        }
    }
}

#[cfg(test)]
#[path = "timers_tests.rs"]
mod tests;
