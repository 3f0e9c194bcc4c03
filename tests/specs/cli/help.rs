// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help and argument specs

use crate::prelude::*;

#[test]
fn help_lists_top_level_commands() {
    let temp = Project::empty();
    temp.chime()
        .args(&["--help"])
        .passes()
        .stdout_has("timer")
        .stdout_has("alarm")
        .stdout_has("recover")
        .stdout_has("completions");
}

#[test]
fn timer_help_lists_operations() {
    let temp = Project::empty();
    temp.chime()
        .args(&["timer", "--help"])
        .passes()
        .stdout_has("plus-minute")
        .stdout_has("reset-expired")
        .stdout_has("set-length");
}

#[test]
fn unknown_command_fails() {
    let temp = Project::empty();
    temp.chime()
        .args(&["snooze"])
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn completions_generate_for_bash() {
    let temp = Project::empty();
    temp.chime()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("_chime()");
}

#[test]
fn invalid_config_is_reported() {
    let temp = Project::empty();
    temp.file("chime.toml", "[timer]\ncrescendo = 12\n");
    temp.chime()
        .args(&["timer", "list"])
        .fails()
        .stderr_has("chime.toml");
}
