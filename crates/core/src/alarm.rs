// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurring alarm schedules
//!
//! An [`Alarm`] fires at a local wall-clock time on a set of weekdays, or
//! once when no weekday is set. Occurrences are computed on local calendar
//! dates and converted to instants last, so an alarm keeps its hour and
//! minute across daylight saving transitions.

use crate::ringtone::Ringtone;
use crate::weekdays::Weekdays;
use chrono::{
    DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Timelike,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlarmError {
    #[error("invalid time of day {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },
}

/// A recurring alarm definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    hour: u32,
    minute: u32,
    pub days_of_week: Weekdays,
    pub enabled: bool,
    pub vibrate: bool,
    pub label: String,
    pub ringtone: Ringtone,
    pub delete_after_use: bool,
}

impl Alarm {
    /// A disabled one-time alarm at the given local time
    pub fn new(hour: u32, minute: u32) -> Result<Self, AlarmError> {
        if NaiveTime::from_hms_opt(hour, minute, 0).is_none() {
            return Err(AlarmError::InvalidTime { hour, minute });
        }
        Ok(Self {
            hour,
            minute,
            days_of_week: Weekdays::NONE,
            enabled: false,
            vibrate: true,
            label: String::new(),
            ringtone: Ringtone::Default,
            delete_after_use: false,
        })
    }

    pub fn with_days(self, days_of_week: Weekdays) -> Self {
        Self {
            days_of_week,
            ..self
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn label_or_default<'a>(&'a self, default: &'a str) -> &'a str {
        if self.label.is_empty() {
            default
        } else {
            &self.label
        }
    }

    fn time_of_day(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// First occurrence strictly after `now`
    pub fn next_alarm_time<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let tz = now.timezone();
        let mut date = now.date_naive();

        if resolve_local(&tz, date.and_time(self.time_of_day())) <= *now {
            date = add_days(date, 1);
        }
        if let Some(distance) = self.days_of_week.distance_to_next_day(date.weekday()) {
            date = add_days(date, distance);
        }

        resolve_local(&tz, date.and_time(self.time_of_day()))
    }

    /// Most recent enabled weekday before `now`'s date, at the alarm's time
    ///
    /// One-time alarms have no previous occurrence.
    pub fn previous_alarm_time<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz = now.timezone();
        let date = now.date_naive();
        let distance = self.days_of_week.distance_to_previous_day(date.weekday())?;
        let date = date.checked_sub_days(Days::new(u64::from(distance)))?;
        Some(resolve_local(&tz, date.and_time(self.time_of_day())))
    }

    /// True when the alarm's time of day has already passed today
    pub fn is_tomorrow(&self, now: &impl Timelike) -> bool {
        let alarm_minutes = self.hour * 60 + self.minute;
        let now_minutes = now.hour() * 60 + now.minute();
        alarm_minutes <= now_minutes
    }
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Convert a local wall time to an instant
///
/// A repeated wall time resolves to its earlier instant. A skipped wall time
/// is read with the offset in force the day before, which moves it forward
/// by the length of the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = local
                .checked_sub_days(Days::new(1))
                .and_then(|day_before| tz.from_local_datetime(&day_before).earliest());
            let offset = match before {
                Some(dt) => dt.offset().fix(),
                None => tz.offset_from_utc_datetime(&local).fix(),
            };
            tz.from_utc_datetime(&(local - offset))
        }
    }
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
