// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer commands

use super::CliModel;
use crate::error::{from_model, length_out_of_range};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use chime_core::timer::{MAX_LENGTH, MIN_LENGTH};
use chime_core::{Clock, Timer, TimerId};
use chime_engine::EventSource;
use clap::Subcommand;
use serde::Serialize;
use std::fmt;

#[derive(Subcommand)]
pub enum TimerCommand {
    /// Create a timer in the reset state and print its id
    Add {
        /// Length, e.g. 90s, 5m, 1h 30m
        #[arg(value_parser = parse_length)]
        length: i64,
        /// Label shown in notifications
        #[arg(long)]
        label: Option<String>,
        /// Delete the timer instead of resetting it once it completes
        #[arg(long)]
        once: bool,
    },
    /// List all timers, newest first
    List,
    /// Start or resume a timer
    Start { id: TimerId },
    /// Pause a running timer
    Pause { id: TimerId },
    /// Reset a timer to its original length
    Reset { id: TimerId },
    /// Delete a timer
    Remove { id: TimerId },
    /// Add one minute to a timer
    PlusMinute { id: TimerId },
    /// Set or clear a timer's label
    Label {
        id: TimerId,
        /// New label; omit to clear
        text: Option<String>,
    },
    /// Change the length of a timer
    SetLength {
        id: TimerId,
        #[arg(value_parser = parse_length)]
        length: i64,
    },
    /// Reset every expired timer, deleting one-shot timers
    ResetExpired,
    /// Reset every missed timer, deleting one-shot timers
    ResetMissed,
    /// Reset every running or paused timer
    ResetUnexpired,
}

/// One row of `chime timer list`
#[derive(Debug, Serialize)]
pub struct TimerInfo {
    pub id: Option<TimerId>,
    pub state: String,
    pub length_ms: i64,
    pub remaining_ms: i64,
    pub label: Option<String>,
    pub delete_after_use: bool,
}

impl TimerInfo {
    pub fn new(timer: &Timer, clock: &impl Clock) -> Self {
        Self {
            id: timer.id,
            state: timer.state.to_string(),
            length_ms: timer.length,
            remaining_ms: timer.remaining_time(clock),
            label: timer.label.clone(),
            delete_after_use: timer.delete_after_use,
        }
    }
}

pub const LIST_HEADER: &str = "ID    STATE    REMAINING   LABEL";

impl fmt::Display for TimerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map(|id| id.to_string()).unwrap_or_default();
        write!(
            f,
            "{:<5} {:<8} {:<11} {}",
            id,
            self.state,
            format_remaining(self.remaining_ms),
            self.label.as_deref().unwrap_or("-")
        )
    }
}

/// Render milliseconds as `[-]h:mm:ss`, or `[-]m:ss` under an hour
///
/// Partial seconds round up while counting down so a timer shows `0:01`
/// until it actually expires.
pub fn format_remaining(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let abs = ms.unsigned_abs();
    let secs = if ms > 0 {
        abs.div_ceil(1_000)
    } else {
        abs / 1_000
    };
    let (h, m, s) = (secs / 3_600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{}{}:{:02}:{:02}", sign, h, m, s)
    } else {
        format!("{}{}:{:02}", sign, m, s)
    }
}

/// Parse a humantime duration into a timer length in ms
pub fn parse_length(s: &str) -> Result<i64, String> {
    let duration = humantime::parse_duration(s).map_err(|e| e.to_string())?;
    let ms = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&ms) {
        return Err(length_out_of_range(duration));
    }
    Ok(ms)
}

pub fn handle(model: &mut CliModel, command: TimerCommand, format: OutputFormat) -> Result<()> {
    let source = Some(EventSource::Cli);
    match command {
        TimerCommand::Add {
            length,
            label,
            once,
        } => {
            let timer = model.add_timer(length, label, once).map_err(from_model)?;
            match (format, timer.id) {
                (OutputFormat::Text, Some(id)) => println!("{}", id),
                _ => show(model, &timer, format),
            }
        }
        TimerCommand::List => {
            let rows: Vec<TimerInfo> = model
                .timers()
                .iter()
                .map(|t| TimerInfo::new(t, model.clock()))
                .collect();
            output::print_list(&rows, format, LIST_HEADER, "No timers");
        }
        TimerCommand::Start { id } => {
            let timer = model.start_timer(id).map_err(from_model)?;
            show(model, &timer, format);
        }
        TimerCommand::Pause { id } => {
            let timer = model.pause_timer(id).map_err(from_model)?;
            show(model, &timer, format);
        }
        TimerCommand::Reset { id } => {
            match model.reset_timer(id, true, source).map_err(from_model)? {
                Some(timer) => show(model, &timer, format),
                None => println!("Deleted timer {}", id),
            }
        }
        TimerCommand::Remove { id } => {
            model.remove_timer(id).map_err(from_model)?;
            println!("Removed timer {}", id);
        }
        TimerCommand::PlusMinute { id } => {
            let timer = model.add_minute(id).map_err(from_model)?;
            show(model, &timer, format);
        }
        TimerCommand::Label { id, text } => {
            let label = text.filter(|t| !t.is_empty());
            let timer = model.set_timer_label(id, label).map_err(from_model)?;
            show(model, &timer, format);
        }
        TimerCommand::SetLength { id, length } => {
            let timer = model.set_timer_length(id, length).map_err(from_model)?;
            show(model, &timer, format);
        }
        TimerCommand::ResetExpired => {
            model
                .reset_or_delete_expired_timers(source)
                .map_err(from_model)?;
        }
        TimerCommand::ResetMissed => {
            model.reset_missed_timers(source).map_err(from_model)?;
        }
        TimerCommand::ResetUnexpired => {
            model.reset_unexpired_timers(source).map_err(from_model)?;
        }
    }
    Ok(())
}

fn show(model: &CliModel, timer: &Timer, format: OutputFormat) {
    output::print(&TimerInfo::new(timer, model.clock()), format);
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
