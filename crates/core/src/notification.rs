// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification content for timers
//!
//! Three categories are posted independently: a summary of timers that are
//! counting (or paused), a summary of missed timers, and a heads-up for
//! expired timers. Builders expect timers in urgency order, most urgent
//! first.

use crate::clock::Clock;
use crate::id::TimerId;
use crate::timer::Timer;

/// Notification urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyUrgency {
    /// Normal notification (no sound)
    Normal,
    /// Important notification (default sound)
    Important,
    /// Critical notification (stays visible)
    Critical,
}

/// An action offered on a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    Pause(TimerId),
    Resume(TimerId),
    AddMinute(TimerId),
    Reset(TimerId),
    ResetUnexpired,
    ResetMissed,
    StopAll,
}

impl NotificationAction {
    pub fn title(&self) -> &'static str {
        match self {
            NotificationAction::Pause(_) => "Pause",
            NotificationAction::Resume(_) => "Resume",
            NotificationAction::AddMinute(_) => "+1 min",
            NotificationAction::Reset(_) => "Reset",
            NotificationAction::ResetUnexpired | NotificationAction::ResetMissed => "Reset all",
            NotificationAction::StopAll => "Stop all",
        }
    }
}

/// A notification to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub urgency: NotifyUrgency,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            urgency: NotifyUrgency::Normal,
            actions: Vec::new(),
        }
    }

    pub fn with_urgency(mut self, urgency: NotifyUrgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.actions.push(action);
        self
    }
}

fn non_empty(label: &Option<String>) -> Option<&str> {
    label.as_deref().filter(|l| !l.is_empty())
}

/// Summary of running and paused timers
pub fn unexpired(timers: &[Timer], clock: &impl Clock) -> Option<Notification> {
    let first = timers.first()?;
    let remaining = format_remaining(first.remaining_time(clock));
    let running = first.is_running();

    let notification = match (timers.len(), first.id) {
        (1, Some(id)) if running => Notification::new(
            non_empty(&first.label).unwrap_or("Timer"),
            remaining,
        )
        .with_action(NotificationAction::Pause(id))
        .with_action(NotificationAction::AddMinute(id)),
        (1, Some(id)) => Notification::new("Timer paused", remaining)
            .with_action(NotificationAction::Resume(id))
            .with_action(NotificationAction::Reset(id)),
        (count, _) if running => Notification::new(
            format!("{} timers running", count),
            format!("Next timer: {}", remaining),
        )
        .with_action(NotificationAction::ResetUnexpired),
        (count, _) => Notification::new(format!("{} timers paused", count), "All timers paused")
            .with_action(NotificationAction::ResetUnexpired),
    };
    Some(notification)
}

/// Summary of timers that expired while nobody was around
pub fn missed(timers: &[Timer], clock: &impl Clock) -> Option<Notification> {
    let first = timers.first()?;
    let overdue = format_remaining(first.remaining_time(clock));

    let notification = match (timers.len(), first.id) {
        (1, Some(id)) => {
            let title = match non_empty(&first.label) {
                Some(label) => format!("Missed timer: {}", label),
                None => "Missed timer".to_string(),
            };
            Notification::new(title, overdue).with_action(NotificationAction::Reset(id))
        }
        (count, _) => Notification::new(format!("{} missed timers", count), overdue)
            .with_action(NotificationAction::ResetMissed),
    };
    Some(notification.with_urgency(NotifyUrgency::Important))
}

/// Heads-up for expired timers
pub fn heads_up(timers: &[Timer]) -> Option<Notification> {
    let first = timers.first()?;

    let notification = match (timers.len(), first.id) {
        (1, Some(id)) => Notification::new(non_empty(&first.label).unwrap_or("Time's up"), "Time's up")
            .with_action(NotificationAction::Reset(id))
            .with_action(NotificationAction::AddMinute(id)),
        (count, _) => Notification::new(
            format!("{} timers expired", count),
            format!("{} timers expired", count),
        )
        .with_action(NotificationAction::StopAll),
    };
    Some(notification.with_urgency(NotifyUrgency::Critical))
}

/// Format a duration in ms as `h:mm:ss` or `m:ss`, with a leading `-` once
/// the countdown has passed zero
///
/// Positive values round up to the next whole second so a timer never shows
/// `0:00` while it still has time left.
pub fn format_remaining(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let abs = ms.unsigned_abs();
    let seconds = if ms > 0 { abs.div_ceil(1000) } else { abs / 1000 };
    let (h, m, s) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
    if h > 0 {
        format!("{}{}:{:02}:{:02}", sign, h, m, s)
    } else {
        format!("{}{}:{:02}", sign, m, s)
    }
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
