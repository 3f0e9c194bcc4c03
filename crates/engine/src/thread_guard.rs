// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Confinement of model mutations to the creating thread

use std::thread::{self, ThreadId};

/// Records the thread that created the model
#[derive(Debug, Clone)]
pub struct ThreadGuard {
    owner: ThreadId,
}

impl ThreadGuard {
    pub fn new() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    pub fn is_owner(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Log an error when `operation` runs off the owner thread; debug builds
    /// also assert
    pub fn check(&self, operation: &'static str) {
        let owned = self.is_owner();
        if !owned {
            tracing::error!(
                operation,
                owner = ?self.owner,
                current = ?thread::current().id(),
                "timer model used off its owner thread"
            );
        }
        debug_assert!(owned, "{} called off the timer model's owner thread", operation);
    }
}

impl Default for ThreadGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creating_thread_owns_guard() {
        let guard = ThreadGuard::new();
        assert!(guard.is_owner());
        guard.check("test");
    }

    #[test]
    fn other_threads_do_not_own_guard() {
        let guard = ThreadGuard::new();
        let owned = std::thread::spawn(move || guard.is_owner()).join().unwrap();
        assert!(!owned);
    }

    #[test]
    #[cfg(debug_assertions)]
    fn check_off_thread_asserts_in_debug() {
        let guard = ThreadGuard::new();
        let result = std::thread::spawn(move || guard.check("update_timer")).join();
        assert!(result.is_err());
    }
}
