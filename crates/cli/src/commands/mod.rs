// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod alarm;
pub mod recover;
pub mod timer;

use anyhow::{Context, Result};
use chime_core::config::{self, STORE_FILE};
use chime_core::{ChimeConfig, SystemClock};
use chime_engine::{ChimeContext, TimerModel};
use chime_storage::{JsonFilePrefs, TimerStore};
use std::path::Path;

/// Timer model used by one CLI invocation
///
/// The CLI never rings or notifies; the daemon does that after picking up
/// the change from the shared store.
pub type CliModel = TimerModel<JsonFilePrefs, SystemClock>;

/// Open the timer model over the store in the resolved data directory
pub fn open_model(explicit: Option<&Path>) -> Result<CliModel> {
    let data_dir = config::data_dir(explicit)?;
    let settings = ChimeConfig::load(&data_dir)
        .with_context(|| format!("loading settings from {}", data_dir.display()))?;
    let store_path = data_dir.join(STORE_FILE);
    let prefs = JsonFilePrefs::open(&store_path)
        .with_context(|| format!("opening timer store {}", store_path.display()))?;
    tracing::debug!(store = %store_path.display(), "opened timer store");

    let context = ChimeContext::new(SystemClock, settings.timer);
    Ok(TimerModel::new(context, TimerStore::new(prefs)))
}
