// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime-storage: persistence for timers

mod json;
mod prefs;
mod timers;

pub use json::JsonFilePrefs;
pub use prefs::{MemoryPrefs, PrefValue, Prefs, StorageError};
pub use timers::TimerStore;
