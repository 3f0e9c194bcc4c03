// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::notify::{NotifyError, TimerNotifier};
use crate::ringer::{Ringer, RingerError};
use crate::wake::{WakeError, WakeScheduler, WakeToken};
use crate::wake_lock::{WakeLock, WakeLockError};
use chime_core::{PresenterId, Timer, TimerSettings};

/// Wrapper that adds tracing to any WakeScheduler
#[derive(Clone)]
pub struct TracedWakeScheduler<W> {
    inner: W,
}

impl<W> TracedWakeScheduler<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: WakeScheduler> WakeScheduler for TracedWakeScheduler<W> {
    fn schedule_exact_wake(&self, at: i64, token: WakeToken) -> Result<(), WakeError> {
        let span = tracing::info_span!("wake.schedule", %token, at);
        let _guard = span.enter();

        let result = self.inner.schedule_exact_wake(at, token);
        match &result {
            Ok(()) => tracing::debug!("armed"),
            Err(e) => tracing::error!(error = %e, "arm failed"),
        }
        result
    }

    fn cancel_wake(&self, token: WakeToken) -> Result<(), WakeError> {
        let span = tracing::info_span!("wake.cancel", %token);
        let _guard = span.enter();

        let result = self.inner.cancel_wake(token);
        match &result {
            Ok(()) => tracing::debug!("cancelled"),
            Err(e) => tracing::warn!(error = %e, "cancel failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any Ringer
#[derive(Clone)]
pub struct TracedRinger<R> {
    inner: R,
}

impl<R> TracedRinger<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Ringer> Ringer for TracedRinger<R> {
    fn start(&self, settings: &TimerSettings) -> Result<(), RingerError> {
        let span = tracing::info_span!("ringer.start", ringtone = %settings.ringtone);
        let _guard = span.enter();

        tracing::info!(
            crescendo_ms = settings.crescendo_ms(),
            vibrate = settings.vibrate,
            "starting"
        );
        let start = std::time::Instant::now();
        let result = self.inner.start(settings);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "ringing"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "start failed"
            ),
        }
        result
    }

    fn stop(&self) -> Result<(), RingerError> {
        let span = tracing::info_span!("ringer.stop");
        let _guard = span.enter();

        let result = self.inner.stop();
        match &result {
            Ok(()) => tracing::info!("stopped"),
            Err(e) => tracing::warn!(error = %e, "stop failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any WakeLock
#[derive(Clone)]
pub struct TracedWakeLock<L> {
    inner: L,
}

impl<L> TracedWakeLock<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<L: WakeLock> WakeLock for TracedWakeLock<L> {
    fn acquire(&self) -> Result<(), WakeLockError> {
        let result = self.inner.acquire();
        match &result {
            Ok(()) => tracing::debug!("wake lock acquired"),
            Err(e) => tracing::warn!(error = %e, "wake lock acquire failed"),
        }
        result
    }

    fn release(&self) -> Result<(), WakeLockError> {
        let result = self.inner.release();
        match &result {
            Ok(()) => tracing::debug!("wake lock released"),
            Err(e) => tracing::warn!(error = %e, "wake lock release failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any TimerNotifier
#[derive(Clone)]
pub struct TracedNotifier<N> {
    inner: N,
}

impl<N> TracedNotifier<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

impl<N: TimerNotifier> TimerNotifier for TracedNotifier<N> {
    fn update_unexpired(&self, timers: &[Timer]) -> Result<(), NotifyError> {
        let result = self.inner.update_unexpired(timers);
        log_update("unexpired", timers.len(), &result);
        result
    }

    fn update_missed(&self, timers: &[Timer]) -> Result<(), NotifyError> {
        let result = self.inner.update_missed(timers);
        log_update("missed", timers.len(), &result);
        result
    }

    fn update_heads_up(
        &self,
        presenter: &PresenterId,
        expired: &[Timer],
    ) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notify.heads_up", %presenter);
        let _guard = span.enter();

        let result = self.inner.update_heads_up(presenter, expired);
        log_update("heads_up", expired.len(), &result);
        result
    }
}

fn log_update(category: &str, count: usize, result: &Result<(), NotifyError>) {
    match result {
        Ok(()) => tracing::debug!(category, count, "notification updated"),
        Err(e) => tracing::warn!(category, count, error = %e, "notification failed"),
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
