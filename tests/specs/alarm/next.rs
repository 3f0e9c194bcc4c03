// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm schedule specs

use crate::prelude::*;

// 2026-01-05 is a Monday
const MONDAY_8AM: &str = "2026-01-05T08:00:00-05:00";

#[test]
fn one_time_alarm_rolls_to_tomorrow() {
    let temp = Project::empty();
    temp.chime()
        .args(&["alarm", "next", "--at", "07:00", "--from", MONDAY_8AM])
        .passes()
        .stdout_eq("2026-01-06T07:00:00-05:00\n");
}

#[test]
fn repeating_alarm_finds_next_enabled_day() {
    let temp = Project::empty();
    temp.chime()
        .args(&[
            "alarm", "next", "--at", "07:00", "--days", "wed,fri", "--from", MONDAY_8AM,
        ])
        .passes()
        .stdout_eq("2026-01-07T07:00:00-05:00\n");
}

#[test]
fn previous_occurrence() {
    let temp = Project::empty();
    temp.chime()
        .args(&[
            "alarm", "next", "--at", "07:00", "--days", "fri", "--from", MONDAY_8AM,
            "--previous",
        ])
        .passes()
        .stdout_eq("2026-01-02T07:00:00-05:00\n");
}

#[test]
fn previous_of_one_time_alarm_fails() {
    let temp = Project::empty();
    temp.chime()
        .args(&["alarm", "next", "--at", "07:00", "--from", MONDAY_8AM, "--previous"])
        .fails()
        .stderr_has("no previous occurrence");
}

#[test]
fn json_output_describes_repeat_days() {
    let temp = Project::empty();
    let out = temp
        .chime()
        .args(&[
            "alarm", "next", "--at", "09:15", "--days", "weekdays", "--from", MONDAY_8AM,
            "--format", "json",
        ])
        .passes();
    let occurrence: serde_json::Value = serde_json::from_str(&out.stdout()).unwrap();
    assert_eq!(occurrence["at"], "2026-01-05T09:15:00-05:00");
    assert_eq!(occurrence["repeats"], "Mon, Tue, Wed, Thu, Fri");
    assert_eq!(occurrence["tomorrow"], false);
}

#[test]
fn invalid_time_is_rejected() {
    let temp = Project::empty();
    temp.chime()
        .args(&["alarm", "next", "--at", "25:00"])
        .fails()
        .stderr_has("invalid");
}
