// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wake lock held by a `systemd-inhibit` child process

use super::{WakeLock, WakeLockError};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

/// Holds a sleep inhibitor for as long as the child process lives
#[derive(Clone)]
pub struct InhibitWakeLock {
    program: String,
    child: Arc<Mutex<Option<Child>>>,
}

impl InhibitWakeLock {
    pub fn new() -> Self {
        Self::with_program("systemd-inhibit")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_held(&self) -> bool {
        self.child
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

impl Default for InhibitWakeLock {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeLock for InhibitWakeLock {
    fn acquire(&self) -> Result<(), WakeLockError> {
        let mut guard = self.child.lock().unwrap_or_else(|e| e.into_inner());
        if guard.is_some() {
            return Ok(());
        }
        let child = Command::new(&self.program)
            .args([
                "--what=sleep:idle",
                "--who=chimed",
                "--why=Timer ringing",
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(WakeLockError::Acquire)?;
        tracing::debug!(pid = child.id(), "sleep inhibitor started");
        *guard = Some(child);
        Ok(())
    }

    fn release(&self) -> Result<(), WakeLockError> {
        let child = self.child.lock().unwrap_or_else(|e| e.into_inner()).take();
        let Some(mut child) = child else {
            return Ok(());
        };
        if let Err(e) = child.kill() {
            if e.kind() != std::io::ErrorKind::InvalidInput {
                return Err(WakeLockError::Release(e));
            }
        }
        child.wait().map_err(WakeLockError::Release)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_fails_to_acquire() {
        let lock = InhibitWakeLock::with_program("definitely-not-systemd-inhibit");
        assert!(matches!(lock.acquire(), Err(WakeLockError::Acquire(_))));
        assert!(!lock.is_held());
    }

    #[test]
    fn releasing_free_lock_is_ok() {
        let lock = InhibitWakeLock::with_program("definitely-not-systemd-inhibit");
        lock.release().unwrap();
    }
}
