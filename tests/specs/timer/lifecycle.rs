// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer lifecycle specs
//!
//! Verify add/start/pause/reset/remove through the CLI and the shared store.

use crate::prelude::*;

#[test]
fn add_prints_sequential_ids() {
    let temp = Project::empty();
    assert_eq!(temp.add_timer("5m"), "0");
    assert_eq!(temp.add_timer("90s"), "1");
}

#[test]
fn add_with_label_and_once() {
    let temp = Project::empty();
    temp.chime()
        .args(&["timer", "add", "2m", "--label", "tea", "--once"])
        .passes()
        .stdout_eq("0\n");

    let timers = temp.timers_json();
    assert_eq!(timers.len(), 1);
    assert_eq!(timers[0]["label"], "tea");
    assert_eq!(timers[0]["delete_after_use"], true);
    assert_eq!(timers[0]["state"], "reset");
    assert_eq!(timers[0]["remaining_ms"], 120_000);
}

#[test]
fn add_rejects_out_of_range_length() {
    let temp = Project::empty();
    temp.chime()
        .args(&["timer", "add", "200h"])
        .fails()
        .stderr_has("out of range");
}

#[test]
fn start_then_pause_keeps_remaining_time() {
    let temp = Project::empty();
    let id = temp.add_timer("10m");

    temp.chime()
        .args(&["timer", "start", &id])
        .passes()
        .stdout_has("running");
    temp.chime()
        .args(&["timer", "pause", &id])
        .passes()
        .stdout_has("paused");

    let timers = temp.timers_json();
    assert_eq!(timers[0]["state"], "paused");
    let remaining = timers[0]["remaining_ms"].as_i64().unwrap();
    assert!(remaining > 590_000 && remaining <= 600_000);
}

#[test]
fn plus_minute_extends_timer() {
    let temp = Project::empty();
    let id = temp.add_timer("1m");
    temp.chime().args(&["timer", "start", &id]).passes();
    temp.chime().args(&["timer", "plus-minute", &id]).passes();

    let remaining = temp.timers_json()[0]["remaining_ms"].as_i64().unwrap();
    assert!(remaining > 110_000);
}

#[test]
fn reset_restores_length() {
    let temp = Project::empty();
    let id = temp.add_timer("3m");
    temp.chime().args(&["timer", "start", &id]).passes();
    temp.chime()
        .args(&["timer", "reset", &id])
        .passes()
        .stdout_has("reset")
        .stdout_has("3:00");
}

#[test]
fn label_can_be_set_and_cleared() {
    let temp = Project::empty();
    let id = temp.add_timer("3m");
    temp.chime()
        .args(&["timer", "label", &id, "pasta"])
        .passes()
        .stdout_has("pasta");
    assert_eq!(temp.timers_json()[0]["label"], "pasta");

    temp.chime().args(&["timer", "label", &id]).passes();
    assert!(temp.timers_json()[0]["label"].is_null());
}

#[test]
fn set_length_changes_reset_timer() {
    let temp = Project::empty();
    let id = temp.add_timer("3m");
    temp.chime()
        .args(&["timer", "set-length", &id, "4m"])
        .passes()
        .stdout_has("4:00");
    assert_eq!(temp.timers_json()[0]["length_ms"], 240_000);
}

#[test]
fn remove_deletes_timer() {
    let temp = Project::empty();
    let id = temp.add_timer("3m");
    temp.chime()
        .args(&["timer", "remove", &id])
        .passes()
        .stdout_eq(format!("Removed timer {}\n", id).as_str());
    assert!(temp.timers_json().is_empty());
}

#[test]
fn unknown_id_is_reported_with_suggestion() {
    let temp = Project::empty();
    temp.chime()
        .args(&["timer", "start", "42"])
        .fails()
        .stderr_has("Timer '42' not found")
        .stderr_has("chime timer list");
}

#[test]
fn reset_unexpired_resets_running_and_paused() {
    let temp = Project::empty();
    let a = temp.add_timer("3m");
    let b = temp.add_timer("4m");
    temp.add_timer("5m");
    temp.chime().args(&["timer", "start", &a]).passes();
    temp.chime().args(&["timer", "start", &b]).passes();
    temp.chime().args(&["timer", "pause", &b]).passes();

    temp.chime().args(&["timer", "reset-unexpired"]).passes();

    let timers = temp.timers_json();
    assert_eq!(timers.len(), 3);
    assert!(timers.iter().all(|t| t["state"] == "reset"));
}

#[test]
fn reset_unexpired_keeps_unfinished_one_shot_timers() {
    let temp = Project::empty();
    temp.chime()
        .args(&["timer", "add", "3m", "--once"])
        .passes();
    temp.chime().args(&["timer", "start", "0"]).passes();

    temp.chime().args(&["timer", "reset-unexpired"]).passes();
    let timers = temp.timers_json();
    assert_eq!(timers.len(), 1);
    assert_eq!(timers[0]["state"], "reset");
}
