// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm schedule queries

use crate::error::ChimeError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use chime_core::{Alarm, Order, Weekdays};
use chrono::{DateTime, FixedOffset, Local, SecondsFormat, TimeZone};
use clap::Subcommand;
use serde::Serialize;
use std::fmt;

#[derive(Subcommand)]
pub enum AlarmCommand {
    /// Show when an alarm would next ring
    Next {
        /// Time of day, HH:MM (24-hour)
        #[arg(long, value_parser = parse_time_of_day)]
        at: (u32, u32),
        /// Repeat days: mon,wed,fri or all, weekdays, weekends (default: once)
        #[arg(long, default_value = "none")]
        days: Weekdays,
        /// Reference instant in RFC 3339 (default: now, local zone)
        #[arg(long)]
        from: Option<DateTime<FixedOffset>>,
        /// Show the most recent past occurrence instead
        #[arg(long)]
        previous: bool,
    },
}

/// Result of an alarm schedule query
#[derive(Debug, Serialize)]
pub struct Occurrence {
    pub at: String,
    pub repeats: String,
    /// The time of day has already passed on the reference date
    pub tomorrow: bool,
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.at)
    }
}

/// Parse `HH:MM` into hour and minute
pub fn parse_time_of_day(s: &str) -> Result<(u32, u32), String> {
    let (hour, minute) = s
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got '{}'", s))?;
    let hour: u32 = hour
        .trim()
        .parse()
        .map_err(|_| format!("invalid hour in '{}'", s))?;
    let minute: u32 = minute
        .trim()
        .parse()
        .map_err(|_| format!("invalid minute in '{}'", s))?;
    Alarm::new(hour, minute).map_err(|e| e.to_string())?;
    Ok((hour, minute))
}

pub fn handle(command: AlarmCommand, format: OutputFormat) -> Result<()> {
    match command {
        AlarmCommand::Next {
            at: (hour, minute),
            days,
            from,
            previous,
        } => {
            let alarm = Alarm::new(hour, minute)?.with_days(days);
            let occurrence = match from {
                Some(now) => occurrence(&alarm, &now, previous)?,
                None => occurrence(&alarm, &Local::now(), previous)?,
            };
            output::print(&occurrence, format);
        }
    }
    Ok(())
}

/// Next (or previous) occurrence of `alarm` relative to `now`, in `now`'s zone
pub fn occurrence<Tz: TimeZone>(
    alarm: &Alarm,
    now: &DateTime<Tz>,
    previous: bool,
) -> Result<Occurrence, ChimeError>
where
    Tz::Offset: fmt::Display,
{
    let at = if previous {
        alarm
            .previous_alarm_time(now)
            .ok_or_else(ChimeError::no_previous_occurrence)?
    } else {
        alarm.next_alarm_time(now)
    };
    let repeats = if alarm.days_of_week.is_repeating() {
        alarm.days_of_week.describe(Order::MonToSun)
    } else {
        "once".to_string()
    };
    Ok(Occurrence {
        at: at.to_rfc3339_opts(SecondsFormat::Secs, false),
        repeats,
        tomorrow: alarm.is_tomorrow(&now.naive_local()),
    })
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
