// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer list specs

use crate::prelude::*;

#[test]
fn list_empty() {
    let temp = Project::empty();
    temp.chime()
        .args(&["timer", "list"])
        .passes()
        .stdout_eq("No timers\n");
}

#[test]
fn list_empty_json_is_an_array() {
    let temp = Project::empty();
    assert!(temp.timers_json().is_empty());
}

#[test]
fn list_shows_newest_first() {
    let temp = Project::empty();
    temp.chime()
        .args(&["timer", "add", "1m", "--label", "first"])
        .passes();
    temp.chime()
        .args(&["timer", "add", "2m", "--label", "second"])
        .passes();

    temp.chime()
        .args(&["timer", "list"])
        .passes()
        .stdout_eq(
            "ID    STATE    REMAINING   LABEL\n\
             1     reset    2:00        second\n\
             0     reset    1:00        first\n",
        );
}

#[test]
fn store_is_shared_between_invocations() {
    let temp = Project::empty();
    temp.add_timer("1m");
    assert!(temp.path().join("timers.json").exists());
    assert_eq!(temp.timers_json().len(), 1);
}
