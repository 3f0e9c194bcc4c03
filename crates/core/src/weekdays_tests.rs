// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

#[test]
fn monday_and_wednesday_bits() {
    let days = Weekdays::from_calendar_days(&[Weekday::Mon, Weekday::Wed]);
    assert_eq!(days.bits(), 0x05);
}

#[test]
fn sunday_is_highest_bit() {
    assert_eq!(Weekdays::from_calendar_days(&[Weekday::Sun]).bits(), 0x40);
}

#[test]
fn none_and_all_repeat_flags() {
    assert!(!Weekdays::NONE.is_repeating());
    assert!(Weekdays::ALL.is_repeating());
    assert_eq!(Weekdays::ALL.count(), 7);
    assert_eq!(Weekdays::NONE.count(), 0);
}

#[test]
fn from_bits_drops_unknown_bits() {
    assert_eq!(Weekdays::from_bits(0xFF), Weekdays::ALL);
}

#[test]
fn set_bit_toggles_single_day() {
    let days = Weekdays::ALL.set_bit(Weekday::Sat, false);
    assert!(!days.is_bit_on(Weekday::Sat));
    assert!(days.is_bit_on(Weekday::Sun));
    assert_eq!(days.set_bit(Weekday::Sat, true), Weekdays::ALL);
}

#[parameterized(
    same_day = { 0x01, Weekday::Mon, Some(0) },
    tomorrow = { 0x02, Weekday::Mon, Some(1) },
    wraps_week = { 0x01, Weekday::Sat, Some(2) },
    six_ahead = { 0x01, Weekday::Tue, Some(6) },
    empty = { 0x00, Weekday::Wed, None },
)]
fn next_day_distance(bits: u8, from: Weekday, expected: Option<u32>) {
    assert_eq!(
        Weekdays::from_bits(bits).distance_to_next_day(from),
        expected
    );
}

#[parameterized(
    yesterday = { 0x01, Weekday::Tue, Some(1) },
    same_day_is_a_week_back = { 0x01, Weekday::Mon, Some(7) },
    wraps_week = { 0x40, Weekday::Mon, Some(1) },
    empty = { 0x00, Weekday::Wed, None },
)]
fn previous_day_distance(bits: u8, from: Weekday, expected: Option<u32>) {
    assert_eq!(
        Weekdays::from_bits(bits).distance_to_previous_day(from),
        expected
    );
}

#[parameterized(
    saturday_first = { Order::SatToFri, Weekday::Sat, Weekday::Fri },
    sunday_first = { Order::SunToSat, Weekday::Sun, Weekday::Sat },
    monday_first = { Order::MonToSun, Weekday::Mon, Weekday::Sun },
)]
fn order_is_cyclic(order: Order, first: Weekday, last: Weekday) {
    let days = order.calendar_days();
    assert_eq!(days[0], first);
    assert_eq!(days[6], last);
}

#[test]
fn display_lists_enabled_days() {
    let days = Weekdays::from_calendar_days(&[Weekday::Thu, Weekday::Mon, Weekday::Sun]);
    assert_eq!(days.to_string(), "[M Th Su]");
    assert_eq!(Weekdays::NONE.to_string(), "[]");
}

#[test]
fn describe_follows_order() {
    let days = Weekdays::from_calendar_days(&[Weekday::Mon, Weekday::Sat]);
    assert_eq!(days.describe(Order::MonToSun), "Mon, Sat");
    assert_eq!(days.describe(Order::SatToFri), "Sat, Mon");
    assert_eq!(
        Weekdays::from_calendar_days(&[Weekday::Tue]).describe(Order::MonToSun),
        "Tuesday"
    );
    assert_eq!(Weekdays::ALL.describe(Order::SunToSat), "Every day");
    assert_eq!(Weekdays::NONE.describe(Order::SunToSat), "");
}

#[parameterized(
    list = { "mon, wed,fri", 0x15 },
    long_names = { "Monday,Sunday", 0x41 },
    weekdays = { "weekdays", 0x1F },
    weekends = { "weekends", 0x60 },
    all = { "all", 0x7F },
    none = { "none", 0x00 },
)]
fn parse_weekdays(input: &str, bits: u8) {
    assert_eq!(input.parse::<Weekdays>().unwrap().bits(), bits);
}

#[test]
fn parse_rejects_unknown_day() {
    assert_eq!(
        "mon,funday".parse::<Weekdays>(),
        Err(ParseWeekdaysError("funday".to_string()))
    );
}

proptest! {
    #[test]
    fn bits_round_trip(bits in 0u8..=0x7F) {
        let days = Weekdays::from_bits(bits);
        prop_assert_eq!(Weekdays::from_bits(days.bits()), days);
        prop_assert_eq!(Weekdays::from_calendar_days(&days.calendar_days()), days);
    }

    #[test]
    fn next_day_lands_on_enabled_day(bits in 1u8..=0x7F, from in 0u8..7) {
        let days = Weekdays::from_bits(bits);
        let from = Weekday::try_from(from).unwrap();
        let distance = days.distance_to_next_day(from).unwrap();
        let mut day = from;
        for _ in 0..distance {
            day = day.succ();
        }
        prop_assert!(days.is_bit_on(day));
    }
}
