// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op notifier for when notifications are disabled.

use super::{NotifyError, TimerNotifier};
use chime_core::{PresenterId, Timer};

/// Notifier that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotifier;

impl NoOpNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl TimerNotifier for NoOpNotifier {
    fn update_unexpired(&self, _timers: &[Timer]) -> Result<(), NotifyError> {
        Ok(())
    }

    fn update_missed(&self, _timers: &[Timer]) -> Result<(), NotifyError> {
        Ok(())
    }

    fn update_heads_up(
        &self,
        _presenter: &PresenterId,
        _expired: &[Timer],
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}
