// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime-core: value types for the chime timer and alarm tool
//!
//! This crate provides:
//! - A clock abstraction over boot and wall time
//! - The countdown timer state machine
//! - Weekday sets and recurring alarm math
//! - Notification content and configuration

pub mod clock;
pub mod config;
pub mod id;

pub mod alarm;
pub mod notification;
pub mod ringtone;
pub mod timer;
pub mod weekdays;

// Re-exports
pub use alarm::{Alarm, AlarmError};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ChimeConfig, ConfigError, NotifyBackend, TimerSettings};
pub use id::{PresenterId, TimerId};
pub use notification::{Notification, NotificationAction, NotifyUrgency};
pub use ringtone::Ringtone;
pub use timer::{Timer, TimerState};
pub use weekdays::{Order, Weekdays};
