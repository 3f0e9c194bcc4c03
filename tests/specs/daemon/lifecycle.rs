// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle specs
//!
//! Verify chimed start/stop and that it expires timers written by the CLI.

use crate::prelude::*;
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};

struct Daemon {
    child: Child,
}

impl Daemon {
    /// Start chimed for the project and wait until it reports ready
    fn start(temp: &Project) -> Self {
        let mut child = Command::new(temp.chimed_bin())
            .arg(temp.path())
            .env_remove("CHIME_DATA_DIR")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        let stdout = child.stdout.take().unwrap();
        let mut line = String::new();
        BufReader::new(stdout).read_line(&mut line).unwrap();
        assert_eq!(line.trim(), "READY", "chimed did not start");
        Self { child }
    }

    /// Send SIGTERM and wait for a clean exit
    fn stop(mut self) {
        let status = Command::new("kill")
            .args(["-TERM", &self.child.id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());
        assert!(self.child.wait().unwrap().success());
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn daemon_writes_startup_marker_and_lock() {
    let temp = Project::empty();
    let daemon = Daemon::start(&temp);

    assert!(temp.path().join("chimed.lock").exists());
    let log = std::fs::read_to_string(temp.path().join("chimed.log")).unwrap();
    assert!(log.contains("--- chimed: starting (pid: "));

    daemon.stop();
}

#[test]
fn daemon_removes_lock_on_sigterm() {
    let temp = Project::empty();
    Daemon::start(&temp).stop();
    assert!(!temp.path().join("chimed.lock").exists());
}

#[test]
fn second_daemon_fails_to_start() {
    let temp = Project::empty();
    let daemon = Daemon::start(&temp);

    let output = Command::new(temp.chimed_bin())
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let log = std::fs::read_to_string(temp.path().join("chimed.log")).unwrap();
    assert!(log.contains("daemon already running"));

    daemon.stop();
}

#[test]
fn daemon_expires_timer_started_by_cli() {
    let temp = Project::empty();
    let daemon = Daemon::start(&temp);

    let id = temp.add_timer("1s");
    temp.chime().args(&["timer", "start", &id]).passes();

    let expired = wait_for(SPEC_WAIT_MAX_MS, || {
        temp.timers_json()
            .first()
            .is_some_and(|t| t["state"] == "expired")
    });
    assert!(expired, "timer never expired");

    daemon.stop();
}

#[test]
fn reset_expired_deletes_expired_one_shot_timer() {
    let temp = Project::empty();
    let daemon = Daemon::start(&temp);

    temp.chime()
        .args(&["timer", "add", "1s", "--once"])
        .passes();
    temp.chime().args(&["timer", "start", "0"]).passes();
    assert!(wait_for(SPEC_WAIT_MAX_MS, || {
        temp.timers_json()
            .first()
            .is_some_and(|t| t["state"] == "expired")
    }));

    temp.chime().args(&["timer", "reset-expired"]).passes();
    assert!(temp.timers_json().is_empty());

    daemon.stop();
}
