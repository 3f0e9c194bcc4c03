// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer orchestration
//!
//! The model owns the cached timer list and is the only writer of timer
//! snapshots. Every change is persisted first, then the derived caches, the
//! wake request, the ringer and the listeners are brought up to date.

use crate::context::ChimeContext;
use crate::error::ModelError;
use crate::listener::{ListenerId, Listeners, TimerListener};
use crate::thread_guard::ThreadGuard;
use chime_adapters::WakeToken;
use chime_core::timer::{by_expiry, by_id_desc, MISSED_THRESHOLD};
use chime_core::{Clock, PresenterId, Timer, TimerId};
use chime_storage::{Prefs, TimerStore};
use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::fmt;

/// Where a reset was requested from; recorded in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    Cli,
    Notification,
    Daemon,
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventSource::Cli => "cli",
            EventSource::Notification => "notification",
            EventSource::Daemon => "daemon",
        };
        write!(f, "{}", name)
    }
}

/// In-memory view of all timers, kept in step with the store
pub struct TimerModel<P, C> {
    context: ChimeContext<C>,
    store: TimerStore<P>,
    /// Newest first
    timers: Vec<Timer>,
    /// Most urgent first; rebuilt on read after a timer enters or leaves
    /// the expired state
    expired: OnceCell<Vec<Timer>>,
    missed: OnceCell<Vec<Timer>>,
    /// Expired timers currently sounding the shared ringer
    ringing: BTreeSet<TimerId>,
    /// Owner of the heads-up notification while any timer is expired
    presenter: Option<PresenterId>,
    in_foreground: bool,
    listeners: Listeners,
    guard: ThreadGuard,
}

impl<P: Prefs, C: Clock> TimerModel<P, C> {
    pub fn new(context: ChimeContext<C>, store: TimerStore<P>) -> Self {
        let mut timers = store.timers();
        timers.sort_by(by_id_desc);
        Self {
            context,
            store,
            timers,
            expired: OnceCell::new(),
            missed: OnceCell::new(),
            ringing: BTreeSet::new(),
            presenter: None,
            in_foreground: false,
            listeners: Listeners::default(),
            guard: ThreadGuard::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.context.clock
    }

    pub fn context(&self) -> &ChimeContext<C> {
        &self.context
    }

    /// Direct access to the backing, for bookkeeping keys that live beside
    /// the timers
    pub fn prefs_mut(&mut self) -> &mut P {
        self.store.prefs_mut()
    }

    pub fn add_listener(&mut self, listener: Box<dyn TimerListener>) -> ListenerId {
        self.guard.check("add_listener");
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.guard.check("remove_listener");
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // --- Read accessors ---

    /// All timers, newest first
    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == Some(id))
    }

    /// Expired timers, most urgent first
    pub fn expired_timers(&self) -> &[Timer] {
        self.expired
            .get_or_init(|| sorted_subset(&self.timers, Timer::is_expired))
    }

    /// Missed timers, most urgent first
    pub fn missed_timers(&self) -> &[Timer] {
        self.missed
            .get_or_init(|| sorted_subset(&self.timers, Timer::is_missed))
    }

    pub fn most_recent_expired_timer(&self) -> Option<&Timer> {
        self.expired_timers().last()
    }

    /// The running timer that expires first; the earliest in list order
    /// wins a tie
    pub fn next_expiring_timer(&self) -> Option<&Timer> {
        self.timers
            .iter()
            .filter(|t| t.is_running())
            .filter_map(|t| t.expiration_time().map(|at| (t, at)))
            .min_by_key(|(_, at)| *at)
            .map(|(t, _)| t)
    }

    pub fn presenter(&self) -> Option<&PresenterId> {
        self.presenter.as_ref()
    }

    pub fn is_ringing(&self) -> bool {
        !self.ringing.is_empty()
    }

    pub fn is_in_foreground(&self) -> bool {
        self.in_foreground
    }

    // --- Single-timer operations ---

    /// Create a reset timer and persist it to obtain its id
    pub fn add_timer(
        &mut self,
        length: i64,
        label: Option<String>,
        delete_after_use: bool,
    ) -> Result<Timer, ModelError> {
        self.guard.check("add_timer");
        let timer = self
            .store
            .insert(&Timer::new(length, label, delete_after_use))?;
        tracing::info!(timer_id = ?timer.id, length, "timer added");

        self.timers.insert(0, timer.clone());
        self.update_unexpired_notification();
        self.listeners.added(&timer);
        Ok(timer)
    }

    /// Replace a timer's snapshot with `timer`
    pub fn update_timer(&mut self, timer: Timer) -> Result<(), ModelError> {
        self.guard.check("update_timer");
        self.update_and_notify(timer).map(|_| ())
    }

    pub fn remove_timer(&mut self, id: TimerId) -> Result<(), ModelError> {
        self.guard.check("remove_timer");
        let timer = self.lookup(id)?;
        self.do_remove(&timer)?;

        if timer.is_expired() {
            self.update_heads_up_notification();
        } else if timer.is_missed() {
            self.update_missed_notification();
        } else {
            self.update_unexpired_notification();
        }
        Ok(())
    }

    /// Reset a timer, or delete it when it is a finished one-shot timer and
    /// `allow_delete` is set
    ///
    /// Returns the reset timer, or `None` if it was deleted.
    pub fn reset_timer(
        &mut self,
        id: TimerId,
        allow_delete: bool,
        source: Option<EventSource>,
    ) -> Result<Option<Timer>, ModelError> {
        self.guard.check("reset_timer");
        let timer = self.lookup(id)?;
        let result = self.do_reset_or_delete(&timer, allow_delete, source)?;

        if timer.is_missed() {
            self.update_missed_notification();
        } else if timer.is_expired() {
            self.update_heads_up_notification();
        } else {
            self.update_unexpired_notification();
        }
        Ok(result)
    }

    /// Expire a timer on behalf of `presenter`
    ///
    /// The first presenter to expire a timer owns the heads-up notification
    /// until no expired timers remain.
    pub fn expire_timer(&mut self, presenter: PresenterId, id: TimerId) -> Result<(), ModelError> {
        self.guard.check("expire_timer");
        match &self.presenter {
            None => self.presenter = Some(presenter),
            Some(owner) if *owner != presenter => {
                tracing::error!(
                    owner = %owner,
                    presenter = %presenter,
                    "expected presenters to be identical; keeping the first"
                );
            }
            Some(_) => {}
        }
        let timer = self.lookup(id)?;
        let expired = timer.expire(&self.context.clock);
        self.update_and_notify(expired).map(|_| ())
    }

    pub fn start_timer(&mut self, id: TimerId) -> Result<Timer, ModelError> {
        self.guard.check("start_timer");
        self.transform(id, |t, clock| t.start(clock))
    }

    pub fn pause_timer(&mut self, id: TimerId) -> Result<Timer, ModelError> {
        self.guard.check("pause_timer");
        self.transform(id, |t, clock| t.pause(clock))
    }

    pub fn add_minute(&mut self, id: TimerId) -> Result<Timer, ModelError> {
        self.guard.check("add_minute");
        self.transform(id, |t, clock| t.add_minute(clock))
    }

    pub fn set_timer_label(
        &mut self,
        id: TimerId,
        label: Option<String>,
    ) -> Result<Timer, ModelError> {
        self.guard.check("set_timer_label");
        self.transform(id, |t, _| t.set_label(label))
    }

    pub fn set_timer_length(&mut self, id: TimerId, length: i64) -> Result<Timer, ModelError> {
        self.guard.check("set_timer_length");
        self.transform(id, |t, _| t.set_length(length))
    }

    pub fn set_remaining_time(
        &mut self,
        id: TimerId,
        remaining: i64,
    ) -> Result<Timer, ModelError> {
        self.guard.check("set_remaining_time");
        self.transform(id, |t, clock| t.set_remaining_time(remaining, clock))
    }

    // --- Bulk operations ---
    //
    // Each applies its transition per timer without notifying, then brings
    // all three notification categories up to date once.

    pub fn reset_or_delete_expired_timers(
        &mut self,
        source: Option<EventSource>,
    ) -> Result<(), ModelError> {
        self.guard.check("reset_or_delete_expired_timers");
        for timer in self.timers.clone() {
            if timer.is_expired() {
                self.do_reset_or_delete(&timer, true, source)?;
            }
        }
        self.update_all_notifications();
        Ok(())
    }

    pub fn reset_missed_timers(&mut self, source: Option<EventSource>) -> Result<(), ModelError> {
        self.guard.check("reset_missed_timers");
        for timer in self.timers.clone() {
            if timer.is_missed() {
                self.do_reset_or_delete(&timer, true, source)?;
            }
        }
        self.update_all_notifications();
        Ok(())
    }

    pub fn reset_unexpired_timers(
        &mut self,
        source: Option<EventSource>,
    ) -> Result<(), ModelError> {
        self.guard.check("reset_unexpired_timers");
        for timer in self.timers.clone() {
            if timer.is_running() || timer.is_paused() {
                self.do_reset_or_delete(&timer, true, source)?;
            }
        }
        self.update_all_notifications();
        Ok(())
    }

    /// Re-base every timer after the boot clock restarted
    ///
    /// A running timer that ended more than a minute ago while the machine
    /// was down is marked missed.
    pub fn update_timers_after_reboot(&mut self) -> Result<(), ModelError> {
        self.guard.check("update_timers_after_reboot");
        tracing::info!(count = self.timers.len(), "updating timers after reboot");
        for timer in self.timers.clone() {
            let clock = &self.context.clock;
            let mut updated = timer.update_after_reboot(clock);
            if updated.is_running() && updated.remaining_time(clock) < MISSED_THRESHOLD {
                updated = updated.miss(clock);
            }
            self.do_update(updated)?;
        }
        self.update_all_notifications();
        Ok(())
    }

    /// Re-base every timer after the wall clock was changed
    pub fn update_timers_after_time_set(&mut self) -> Result<(), ModelError> {
        self.guard.check("update_timers_after_time_set");
        tracing::info!(count = self.timers.len(), "updating timers after time set");
        for timer in self.timers.clone() {
            let updated = timer.update_after_time_set(&self.context.clock);
            self.do_update(updated)?;
        }
        self.update_all_notifications();
        Ok(())
    }

    /// Expire every running timer whose countdown has reached zero
    ///
    /// Called when the armed wake request fires. Returns the ids expired.
    pub fn handle_wake(&mut self, presenter: &PresenterId) -> Result<Vec<TimerId>, ModelError> {
        self.guard.check("handle_wake");
        let due: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|t| t.is_running() && t.remaining_time(&self.context.clock) <= 0)
            .filter_map(|t| t.id)
            .collect();
        for id in &due {
            tracing::info!(timer_id = %id, "timer expired");
            self.expire_timer(presenter.clone(), *id)?;
        }
        self.update_wake();
        Ok(due)
    }

    /// Take over timers that were already expired when the model was built
    ///
    /// Starts the ringer and claims the heads-up notification for
    /// `presenter`, as if it had expired them itself. Returns the ids picked
    /// up.
    pub fn resume_expired(&mut self, presenter: &PresenterId) -> Vec<TimerId> {
        self.guard.check("resume_expired");
        let expired = self.expired_timers().to_vec();
        if expired.is_empty() {
            return Vec::new();
        }
        if self.presenter.is_none() {
            self.presenter = Some(presenter.clone());
        }
        for timer in &expired {
            self.update_ringer(None, Some(timer));
        }
        self.update_all_notifications();
        expired.iter().filter_map(|t| t.id).collect()
    }

    /// Re-read the store and apply changes written by other processes
    ///
    /// Changed, added and removed timers go through the same cache, ringer
    /// and listener bookkeeping as local edits, without being written back.
    pub fn refresh(&mut self) -> Result<(), ModelError> {
        self.guard.check("refresh");
        self.store.reload()?;
        let mut fresh = self.store.timers();
        fresh.sort_by(by_id_desc);

        let gone: Vec<Timer> = self
            .timers
            .iter()
            .filter(|cached| !fresh.iter().any(|t| t.same_timer(cached)))
            .cloned()
            .collect();
        let mut changed = !gone.is_empty();
        for timer in &gone {
            tracing::debug!(timer_id = ?timer.id, "timer removed elsewhere");
            self.apply_removed(timer);
        }

        for timer in fresh {
            match self.timers.iter().find(|t| t.same_timer(&timer)).cloned() {
                Some(before) if before == timer => {}
                Some(before) => {
                    tracing::debug!(timer_id = ?timer.id, state = %timer.state, "timer changed elsewhere");
                    self.apply_updated(before, timer);
                    changed = true;
                }
                None => {
                    tracing::debug!(timer_id = ?timer.id, "timer added elsewhere");
                    self.apply_added(timer);
                    changed = true;
                }
            }
        }

        if changed {
            self.update_all_notifications();
        }
        Ok(())
    }

    /// While in the foreground, summary notifications are withdrawn
    pub fn set_in_foreground(&mut self, in_foreground: bool) {
        self.guard.check("set_in_foreground");
        if self.in_foreground == in_foreground {
            return;
        }
        self.in_foreground = in_foreground;
        self.update_unexpired_notification();
        self.update_missed_notification();
    }

    // --- Internals ---

    fn lookup(&self, id: TimerId) -> Result<Timer, ModelError> {
        match self.timer(id) {
            Some(timer) => Ok(timer.clone()),
            None => {
                tracing::error!(timer_id = %id, "timer is not tracked by the model");
                Err(ModelError::UnknownTimer(id))
            }
        }
    }

    fn transform(
        &mut self,
        id: TimerId,
        f: impl FnOnce(&Timer, &C) -> Timer,
    ) -> Result<Timer, ModelError> {
        let timer = self.lookup(id)?;
        let updated = f(&timer, &self.context.clock);
        self.update_and_notify(updated.clone())?;
        Ok(updated)
    }

    fn update_and_notify(&mut self, timer: Timer) -> Result<Timer, ModelError> {
        let before = self.do_update(timer.clone())?;

        self.update_unexpired_notification();
        if before.state != timer.state {
            if before.is_expired() || timer.is_expired() {
                self.update_heads_up_notification();
            }
            if before.is_missed() || timer.is_missed() {
                self.update_missed_notification();
            }
        }
        Ok(before)
    }

    /// Persist and cache an updated snapshot without touching notifications;
    /// returns the prior snapshot
    fn do_update(&mut self, timer: Timer) -> Result<Timer, ModelError> {
        let before = match timer.id {
            Some(id) => self.lookup(id)?,
            None => return Err(chime_storage::StorageError::MissingId.into()),
        };
        if before == timer {
            return Ok(before);
        }
        self.store.update(&timer)?;
        self.apply_updated(before.clone(), timer);
        Ok(before)
    }

    fn do_remove(&mut self, timer: &Timer) -> Result<(), ModelError> {
        if let Some(id) = timer.id {
            self.store.remove(id)?;
            tracing::info!(timer_id = %id, "timer removed");
        }
        self.apply_removed(timer);
        Ok(())
    }

    fn do_reset_or_delete(
        &mut self,
        timer: &Timer,
        allow_delete: bool,
        source: Option<EventSource>,
    ) -> Result<Option<Timer>, ModelError> {
        if allow_delete && (timer.is_expired() || timer.is_missed()) && timer.delete_after_use {
            tracing::info!(timer_id = ?timer.id, source = ?source, "deleting one-shot timer");
            self.do_remove(timer)?;
            return Ok(None);
        }
        if timer.is_reset() {
            return Ok(Some(timer.clone()));
        }
        let reset = timer.reset();
        tracing::info!(timer_id = ?timer.id, source = ?source, "timer reset");
        self.do_update(reset.clone())?;
        Ok(Some(reset))
    }

    fn apply_updated(&mut self, before: Timer, after: Timer) {
        if let Some(slot) = self.timers.iter_mut().find(|t| t.same_timer(&after)) {
            *slot = after.clone();
        }
        self.invalidate(&before);
        self.invalidate(&after);
        self.update_wake();
        self.update_ringer(Some(&before), Some(&after));
        self.listeners.updated(&before, &after);
    }

    fn apply_removed(&mut self, timer: &Timer) {
        let Some(index) = self.timers.iter().position(|t| t.same_timer(timer)) else {
            return;
        };
        let removed = self.timers.remove(index);
        self.invalidate(&removed);
        self.update_wake();
        self.update_ringer(Some(&removed), None);
        self.listeners.removed(&removed);
    }

    fn apply_added(&mut self, timer: Timer) {
        let index = self
            .timers
            .iter()
            .position(|t| by_id_desc(t, &timer).is_gt())
            .unwrap_or(self.timers.len());
        self.timers.insert(index, timer.clone());
        self.invalidate(&timer);
        if timer.is_running() {
            self.update_wake();
        }
        self.update_ringer(None, Some(&timer));
        self.listeners.added(&timer);
    }

    fn invalidate(&mut self, timer: &Timer) {
        if timer.is_expired() {
            self.expired.take();
        }
        if timer.is_missed() {
            self.missed.take();
        }
    }

    /// Arm a single wake request for the next running timer, or withdraw it
    fn update_wake(&self) {
        let wake = &self.context.wake;
        match self.next_expiring_timer().and_then(Timer::expiration_time) {
            Some(at) => {
                if let Err(e) = wake.schedule_exact_wake(at, WakeToken::TIMER_EXPIRY) {
                    tracing::warn!(at, error = %e, "failed to arm timer wake");
                }
            }
            None => {
                if let Err(e) = wake.cancel_wake(WakeToken::TIMER_EXPIRY) {
                    tracing::warn!(error = %e, "failed to cancel timer wake");
                }
            }
        }
    }

    /// Start the ringer for the first expired timer and stop it after the
    /// last one leaves the expired state
    fn update_ringer(&mut self, before: Option<&Timer>, after: Option<&Timer>) {
        if before.map(|t| t.state) == after.map(|t| t.state) {
            return;
        }

        if let Some(id) = after.filter(|t| t.is_expired()).and_then(|t| t.id) {
            if self.ringing.insert(id) && self.ringing.len() == 1 {
                tracing::info!(timer_id = %id, "starting ringer");
                if let Err(e) = self.context.wake_lock.acquire() {
                    tracing::warn!(error = %e, "failed to acquire wake lock");
                }
                if let Err(e) = self.context.ringer.start(&self.context.settings) {
                    tracing::warn!(error = %e, "failed to start ringer");
                }
            }
        }

        if let Some(id) = before.filter(|t| t.is_expired()).and_then(|t| t.id) {
            if self.ringing.remove(&id) && self.ringing.is_empty() {
                tracing::info!(timer_id = %id, "stopping ringer");
                if let Err(e) = self.context.ringer.stop() {
                    tracing::warn!(error = %e, "failed to stop ringer");
                }
                if let Err(e) = self.context.wake_lock.release() {
                    tracing::warn!(error = %e, "failed to release wake lock");
                }
            }
        }
    }

    /// Stop ringing regardless of timer states, for shutdown
    pub fn silence(&mut self) {
        self.guard.check("silence");
        if self.ringing.is_empty() {
            return;
        }
        self.ringing.clear();
        if let Err(e) = self.context.ringer.stop() {
            tracing::warn!(error = %e, "failed to stop ringer");
        }
        if let Err(e) = self.context.wake_lock.release() {
            tracing::warn!(error = %e, "failed to release wake lock");
        }
    }

    fn update_all_notifications(&mut self) {
        self.update_unexpired_notification();
        self.update_missed_notification();
        self.update_heads_up_notification();
    }

    fn update_unexpired_notification(&self) {
        let unexpired = if self.in_foreground {
            Vec::new()
        } else {
            sorted_subset(&self.timers, |t| t.is_running() || t.is_paused())
        };
        if let Err(e) = self.context.notifier.update_unexpired(&unexpired) {
            tracing::warn!(error = %e, "failed to update timer notification");
        }
    }

    fn update_missed_notification(&self) {
        let missed: &[Timer] = if self.in_foreground {
            &[]
        } else {
            self.missed_timers()
        };
        if let Err(e) = self.context.notifier.update_missed(missed) {
            tracing::warn!(error = %e, "failed to update missed timer notification");
        }
    }

    /// Post the heads-up for expired timers, or tear it down and release the
    /// presenter once none remain
    fn update_heads_up_notification(&mut self) {
        let Some(presenter) = self.presenter.clone() else {
            return;
        };
        let expired = self.expired_timers().to_vec();
        if let Err(e) = self.context.notifier.update_heads_up(&presenter, &expired) {
            tracing::warn!(error = %e, "failed to update heads-up notification");
        }
        if expired.is_empty() {
            tracing::debug!(presenter = %presenter, "releasing heads-up presenter");
            self.presenter = None;
        }
    }
}

fn sorted_subset(timers: &[Timer], keep: impl Fn(&Timer) -> bool) -> Vec<Timer> {
    let mut subset: Vec<Timer> = timers.iter().filter(|t| keep(t)).cloned().collect();
    subset.sort_by(by_expiry);
    subset
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
