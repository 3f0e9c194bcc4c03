// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Timer orchestration for chime

mod context;
mod error;
mod listener;
mod model;
mod thread_guard;

pub use context::ChimeContext;
pub use error::ModelError;
pub use listener::{ListenerId, TimerListener};
pub use model::{EventSource, TimerModel};
pub use thread_guard::ThreadGuard;
