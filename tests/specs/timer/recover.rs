// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock recovery specs

use crate::prelude::*;

#[test]
fn recover_requires_an_event() {
    let temp = Project::empty();
    temp.chime().args(&["recover"]).fails();
}

#[test]
fn recover_rejects_both_events() {
    let temp = Project::empty();
    temp.chime()
        .args(&["recover", "--reboot", "--time-set"])
        .fails();
}

#[test]
fn recover_time_set_keeps_running_timers() {
    let temp = Project::empty();
    let id = temp.add_timer("10m");
    temp.chime().args(&["timer", "start", &id]).passes();

    temp.chime()
        .args(&["recover", "--time-set"])
        .passes()
        .stdout_eq("Recovered after time set: 1 running, 0 missed\n");
    assert_eq!(temp.timers_json()[0]["state"], "running");
}

#[test]
fn recover_reboot_reports_json() {
    let temp = Project::empty();
    temp.add_timer("10m");

    let out = temp
        .chime()
        .args(&["recover", "--reboot", "--format", "json"])
        .passes();
    let report: serde_json::Value = serde_json::from_str(&out.stdout()).unwrap();
    assert_eq!(report["event"], "reboot");
    assert_eq!(report["missed"], 0);
}
