// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer change subscriptions

use chime_core::Timer;
use std::fmt;

/// Receives timer changes synchronously, after they are persisted
pub trait TimerListener: Send {
    fn timer_added(&mut self, _timer: &Timer) {}

    fn timer_updated(&mut self, _before: &Timer, _after: &Timer) {}

    fn timer_removed(&mut self, _timer: &Timer) {}
}

/// Handle returned on registration, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Registered listeners in registration order
#[derive(Default)]
pub(crate) struct Listeners {
    next: u64,
    entries: Vec<(ListenerId, Box<dyn TimerListener>)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Box<dyn TimerListener>) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn added(&mut self, timer: &Timer) {
        for (_, listener) in &mut self.entries {
            listener.timer_added(timer);
        }
    }

    pub(crate) fn updated(&mut self, before: &Timer, after: &Timer) {
        for (_, listener) in &mut self.entries {
            listener.timer_updated(before, after);
        }
    }

    pub(crate) fn removed(&mut self, timer: &Timer) {
        for (_, listener) in &mut self.entries {
            listener.timer_removed(timer);
        }
    }
}
