// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op wake lock.

use super::{WakeLock, WakeLockError};

/// Wake lock that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpWakeLock;

impl NoOpWakeLock {
    pub fn new() -> Self {
        Self
    }
}

impl WakeLock for NoOpWakeLock {
    fn acquire(&self) -> Result<(), WakeLockError> {
        Ok(())
    }

    fn release(&self) -> Result<(), WakeLockError> {
        Ok(())
    }
}
