// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for behavioral specs.
//!
//! Every spec runs against its own temporary data directory so specs can
//! run in parallel without sharing a timer store.

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

pub use predicates::str::contains;

/// Upper bound for anything a spec waits on
pub const SPEC_WAIT_MAX_MS: u64 = 5_000;

/// An isolated chime data directory
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let project = Self {
            dir: TempDir::new().unwrap(),
        };
        // Keep specs quiet and local regardless of the host's setup
        project.file("chime.toml", "[notify]\nbackend = \"none\"\n");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the data directory
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// The `chime` CLI bound to this data directory
    pub fn chime(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("chime").unwrap();
        cmd.arg("--data-dir")
            .arg(self.path())
            .env_remove("CHIME_DATA_DIR")
            .env_remove("RUST_LOG");
        CliBuilder { cmd }
    }

    /// Path of the `chimed` binary
    pub fn chimed_bin(&self) -> PathBuf {
        assert_cmd::cargo::cargo_bin("chimed")
    }

    /// Add a timer and return its id
    pub fn add_timer(&self, length: &str) -> String {
        let out = self.chime().args(&["timer", "add", length]).passes();
        out.stdout().trim().to_string()
    }

    /// Timers as reported by `chime timer list --format json`
    pub fn timers_json(&self) -> Vec<serde_json::Value> {
        let out = self
            .chime()
            .args(&["timer", "list", "--format", "json"])
            .passes();
        serde_json::from_str(&out.stdout()).unwrap()
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct RunAssert {
    assert: assert_cmd::assert::Assert,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(contains(expected)),
        }
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self {
            assert: self.assert.stdout(contains(unexpected).not()),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(contains(expected)),
        }
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }
}

/// Poll `condition` until it holds or `max_ms` passes
pub fn wait_for(max_ms: u64, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(max_ms);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    condition()
}
