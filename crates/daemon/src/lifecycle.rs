// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, ticks, shutdown.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chime_adapters::{
    CommandRinger, DesktopBackend, DesktopNotifier, InProcessWakeScheduler, InhibitWakeLock,
    NoOpNotifier, NoOpRinger, NoOpWakeLock, TracedNotifier, TracedRinger, TracedWakeLock,
    TracedWakeScheduler, WakeToken,
};
use chime_core::config::{self, ConfigError, STORE_FILE};
use chime_core::{ChimeConfig, Clock, NotifyBackend, PresenterId, SystemClock};
use chime_engine::{ChimeContext, ModelError, TimerModel};
use chime_storage::{JsonFilePrefs, Prefs, StorageError, TimerStore};
use fs2::FileExt;
use thiserror::Error;
use tracing::{info, warn};

use crate::clock_watch::{ClockChange, ClockWatch};

/// Longest the event loop sleeps between store refreshes
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How often clock readings are written back when nothing changed
pub const CLOCK_SAVE_INTERVAL: Duration = Duration::from_secs(60);

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the store, config, lock and log
    pub data_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Path to the shared timer store
    pub store_path: PathBuf,
    /// Hold a sleep inhibitor while timers ring
    pub inhibit_sleep: bool,
}

impl Config {
    /// Resolve the data directory and derive every path from it
    pub fn load(explicit: Option<&Path>) -> Result<Self, LifecycleError> {
        Ok(Self::for_data_dir(&config::data_dir(explicit)?))
    }

    pub fn for_data_dir(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            lock_path: data_dir.join("chimed.lock"),
            log_path: data_dir.join("chimed.log"),
            store_path: data_dir.join(STORE_FILE),
            inhibit_sleep: cfg!(target_os = "linux"),
        }
    }
}

/// Daemon timer model over the shared store
pub type DaemonModel<C> = TimerModel<JsonFilePrefs, C>;

/// Daemon state during operation
pub struct DaemonState<C: Clock = SystemClock> {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Timer model, the only writer of expirations
    pub model: DaemonModel<C>,
    /// Shared with the model; the event loop sleeps on it
    pub wake: InProcessWakeScheduler,
    /// Owner of the heads-up notification
    pub presenter: PresenterId,
    clock_watch: ClockWatch,
    clock_saved_at: Instant,
    /// When daemon started
    pub start_time: Instant,
}

impl<C: Clock + 'static> DaemonState<C> {
    /// How long the event loop may sleep before the next tick
    pub fn sleep_duration(&self) -> Duration {
        let Some(at) = self.wake.armed(WakeToken::TIMER_EXPIRY) else {
            return POLL_INTERVAL;
        };
        let until = at - self.model.clock().elapsed_realtime();
        if until <= 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(until.unsigned_abs()).min(POLL_INTERVAL)
    }

    /// Pick up edits from other processes, reconcile clocks and expire due
    /// timers
    pub fn tick(&mut self) -> Result<(), LifecycleError> {
        self.model.refresh()?;
        self.reconcile_clocks()?;
        let expired = self.model.handle_wake(&self.presenter)?;
        if !expired.is_empty() {
            info!(count = expired.len(), "timers expired");
        }
        Ok(())
    }

    fn reconcile_clocks(&mut self) -> Result<(), LifecycleError> {
        let change = self.clock_watch.observe(self.model.clock());
        match change {
            ClockChange::Reboot => {
                info!("reboot detected; recovering timers after reboot");
                self.model.update_timers_after_reboot()?;
            }
            ClockChange::TimeSet => {
                info!("wall clock changed; recovering timers after time set");
                self.model.update_timers_after_time_set()?;
            }
            ClockChange::Steady => {}
        }

        if change != ClockChange::Steady || self.clock_saved_at.elapsed() >= CLOCK_SAVE_INTERVAL {
            self.clock_watch.save(self.model.prefs_mut());
            self.model.prefs_mut().commit()?;
            self.clock_saved_at = Instant::now();
        }
        Ok(())
    }

    /// Shutdown the daemon gracefully
    pub fn shutdown(&mut self) {
        info!("Shutting down daemon...");

        // 1. Silence the ringer and release the wake lock
        self.model.silence();

        // 2. Save clock readings for the next start
        self.clock_watch.save(self.model.prefs_mut());
        if let Err(e) = self.model.prefs_mut().commit() {
            warn!("Failed to save clock readings: {}", e);
        }

        // 3. Remove PID file
        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // 4. Lock is released automatically when self.lock_file is dropped

        info!(
            uptime_secs = self.start_time.elapsed().as_secs(),
            "Daemon shutdown complete"
        );
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Timer error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    startup_with_clock(config, SystemClock)
}

/// Start the daemon on an explicit clock
pub fn startup_with_clock<C: Clock + 'static>(
    config: &Config,
    clock: C,
) -> Result<DaemonState<C>, LifecycleError> {
    // 1. Create data directory
    std::fs::create_dir_all(&config.data_dir)?;

    // 2. Acquire lock file FIRST - prevents two daemons sharing a store
    let lock_file = File::create(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file
    use std::io::Write;
    let mut lock_file = lock_file;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    // 3. Load settings and open the store
    let settings = ChimeConfig::load(&config.data_dir)?;
    let prefs = JsonFilePrefs::open(&config.store_path)?;
    let clock_watch = ClockWatch::load(&prefs);

    // 4. Set up adapters (wrapped with tracing for observability)
    let wake = InProcessWakeScheduler::new();
    let context = build_context(&settings, config, clock, wake.clone());
    let model = TimerModel::new(context, TimerStore::new(prefs));

    info!(
        timers = model.timers().len(),
        store = %config.store_path.display(),
        "Loaded timers"
    );

    let mut state = DaemonState {
        config: config.clone(),
        lock_file,
        model,
        wake,
        presenter: PresenterId::new(),
        clock_watch,
        clock_saved_at: Instant::now(),
        start_time: Instant::now(),
    };

    // 5. Recover from anything that happened while no daemon was running
    state.reconcile_clocks()?;
    let resumed = state.model.resume_expired(&state.presenter);
    if !resumed.is_empty() {
        info!(count = resumed.len(), "resumed expired timers");
    }
    state.model.handle_wake(&state.presenter)?;

    info!("Daemon started for data dir: {}", config.data_dir.display());
    Ok(state)
}

fn build_context<C: Clock + 'static>(
    settings: &ChimeConfig,
    config: &Config,
    clock: C,
    wake: InProcessWakeScheduler,
) -> ChimeContext<C> {
    let notifier_clock = clock.clone();
    let context = ChimeContext::new(clock, settings.timer.clone())
        .with_wake_scheduler(TracedWakeScheduler::new(wake));

    let context = match &settings.ringer.command {
        Some(command) => context.with_ringer(TracedRinger::new(CommandRinger::new(command.clone()))),
        None => context.with_ringer(TracedRinger::new(NoOpRinger::new())),
    };

    let context = if config.inhibit_sleep {
        context.with_wake_lock(TracedWakeLock::new(InhibitWakeLock::new()))
    } else {
        context.with_wake_lock(NoOpWakeLock::new())
    };

    let backend = match settings.notify.backend {
        NotifyBackend::None => None,
        NotifyBackend::NotifySend => Some(DesktopBackend::NotifySend),
        NotifyBackend::Osascript => Some(DesktopBackend::Osascript),
    };
    match backend {
        Some(backend) => context.with_notifier(TracedNotifier::new(DesktopNotifier::new(
            backend,
            notifier_clock,
        ))),
        None => context.with_notifier(NoOpNotifier::new()),
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
