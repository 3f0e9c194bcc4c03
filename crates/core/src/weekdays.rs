// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Weekday sets for recurring alarms
//!
//! Bits are fixed regardless of which day a locale starts its week on:
//! Monday is `0x01` and Sunday is `0x40`. [`Order`] only affects
//! presentation.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ALL_BITS: u8 = 0x7F;

/// Calendar days in storage order
const STORAGE_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid weekday '{0}'")]
pub struct ParseWeekdaysError(pub String);

/// Cyclic presentation of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    SatToFri,
    SunToSat,
    #[default]
    MonToSun,
}

impl Order {
    pub fn calendar_days(self) -> [Weekday; 7] {
        let first = match self {
            Order::SatToFri => Weekday::Sat,
            Order::SunToSat => Weekday::Sun,
            Order::MonToSun => Weekday::Mon,
        };
        let mut days = [first; 7];
        let mut day = first;
        for slot in days.iter_mut() {
            *slot = day;
            day = day.succ();
        }
        days
    }
}

/// A set of weekdays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weekdays(u8);

impl Weekdays {
    pub const NONE: Weekdays = Weekdays(0);
    pub const ALL: Weekdays = Weekdays(ALL_BITS);

    /// Bits above Sunday are discarded
    pub fn from_bits(bits: u8) -> Self {
        Weekdays(bits & ALL_BITS)
    }

    pub fn from_calendar_days(days: &[Weekday]) -> Self {
        days.iter()
            .fold(Self::NONE, |set, &day| set.set_bit(day, true))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn set_bit(self, day: Weekday, on: bool) -> Self {
        let bit = bit_for(day);
        if on {
            Weekdays(self.0 | bit)
        } else {
            Weekdays(self.0 & !bit)
        }
    }

    pub fn is_bit_on(self, day: Weekday) -> bool {
        self.0 & bit_for(day) != 0
    }

    pub fn is_repeating(self) -> bool {
        self.0 != 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Enabled days, Monday first
    pub fn calendar_days(self) -> Vec<Weekday> {
        STORAGE_ORDER
            .iter()
            .copied()
            .filter(|&day| self.is_bit_on(day))
            .collect()
    }

    /// Days from `from` (inclusive) to the next enabled day, 0 to 6
    pub fn distance_to_next_day(self, from: Weekday) -> Option<u32> {
        let mut day = from;
        for offset in 0..7 {
            if self.is_bit_on(day) {
                return Some(offset);
            }
            day = day.succ();
        }
        None
    }

    /// Days back from `from` (exclusive) to the previous enabled day, 1 to 7
    pub fn distance_to_previous_day(self, from: Weekday) -> Option<u32> {
        let mut day = from.pred();
        for offset in 1..=7 {
            if self.is_bit_on(day) {
                return Some(offset);
            }
            day = day.pred();
        }
        None
    }

    /// Human readable summary in the given order
    ///
    /// A single day is spelled out; several days use short names.
    pub fn describe(self, order: Order) -> String {
        if self == Self::ALL {
            return "Every day".to_string();
        }
        let days: Vec<Weekday> = order
            .calendar_days()
            .into_iter()
            .filter(|&day| self.is_bit_on(day))
            .collect();
        match days.as_slice() {
            [] => String::new(),
            [day] => long_name(*day).to_string(),
            _ => days
                .iter()
                .map(|day| day.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Compact form listing enabled days, e.g. `[M W F]`
impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.calendar_days().into_iter().map(short_code).collect();
        write!(f, "[{}]", codes.join(" "))
    }
}

/// Parses a comma separated list of day names (`mon,wed,fri`), or one of
/// `all`, `none`, `weekdays`, `weekends`
impl FromStr for Weekdays {
    type Err = ParseWeekdaysError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => return Ok(Self::NONE),
            "all" | "daily" => return Ok(Self::ALL),
            "weekdays" => return Ok(Self::from_bits(0x1F)),
            "weekends" => return Ok(Self::from_bits(0x60)),
            _ => {}
        }
        let mut days = Self::NONE;
        for part in s.split(',') {
            let day = Weekday::from_str(part.trim())
                .map_err(|_| ParseWeekdaysError(part.trim().to_string()))?;
            days = days.set_bit(day, true);
        }
        Ok(days)
    }
}

fn bit_for(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}

fn short_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "M",
        Weekday::Tue => "T",
        Weekday::Wed => "W",
        Weekday::Thu => "Th",
        Weekday::Fri => "F",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

fn long_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
#[path = "weekdays_tests.rs"]
mod tests;
