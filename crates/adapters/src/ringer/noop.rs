// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op ringer for when no player is configured.

use super::{Ringer, RingerError};
use chime_core::TimerSettings;

/// Ringer that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpRinger;

impl NoOpRinger {
    pub fn new() -> Self {
        Self
    }
}

impl Ringer for NoOpRinger {
    fn start(&self, _settings: &TimerSettings) -> Result<(), RingerError> {
        Ok(())
    }

    fn stop(&self) -> Result<(), RingerError> {
        Ok(())
    }
}
