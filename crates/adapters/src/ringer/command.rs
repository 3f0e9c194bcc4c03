// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ringer backed by an external audio player
//!
//! The configured command should keep playing until it is killed, for
//! example `["mpv", "--loop", "{ringtone}"]`. Placeholders:
//! - `{ringtone}`: the ringtone URI, or the default sound
//! - `{crescendo_ms}`: the crescendo duration in milliseconds

use super::{Ringer, RingerError};
use chime_core::{Ringtone, TimerSettings};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

/// Sound used for [`Ringtone::Default`]
pub const DEFAULT_SOUND: &str = "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga";

/// Ringer that spawns a player process and kills it on stop
#[derive(Clone)]
pub struct CommandRinger {
    command: Vec<String>,
    child: Arc<Mutex<Option<Child>>>,
}

impl CommandRinger {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            child: Arc::new(Mutex::new(None)),
        }
    }

    /// True while a player process is running
    pub fn is_playing(&self) -> bool {
        let mut child = self.child.lock().unwrap_or_else(|e| e.into_inner());
        match child.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            Some(Ok(Some(_))) | Some(Err(_)) => {
                *child = None;
                false
            }
            None => false,
        }
    }

    fn build_args(&self, settings: &TimerSettings) -> Vec<String> {
        let sound = match &settings.ringtone {
            Ringtone::Custom(uri) => uri.as_str(),
            Ringtone::Default | Ringtone::Silent => DEFAULT_SOUND,
        };
        let crescendo = settings.crescendo_ms().to_string();
        self.command
            .iter()
            .map(|arg| {
                arg.replace("{ringtone}", sound)
                    .replace("{crescendo_ms}", &crescendo)
            })
            .collect()
    }

    fn kill(child: &mut Child) -> Result<(), RingerError> {
        match child.kill() {
            Ok(()) => {}
            // Already exited
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(RingerError::Kill(e)),
        }
        child.wait().map_err(RingerError::Kill)?;
        Ok(())
    }
}

impl Ringer for CommandRinger {
    fn start(&self, settings: &TimerSettings) -> Result<(), RingerError> {
        self.stop()?;
        if settings.ringtone.is_silent() {
            tracing::debug!("silent ringtone, not starting player");
            return Ok(());
        }

        let args = self.build_args(settings);
        let (program, rest) = args.split_first().ok_or(RingerError::EmptyCommand)?;
        let child = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(RingerError::Spawn)?;

        tracing::debug!(pid = child.id(), program = %program, "player started");
        *self.child.lock().unwrap_or_else(|e| e.into_inner()) = Some(child);
        Ok(())
    }

    fn stop(&self) -> Result<(), RingerError> {
        let child = self
            .child
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        match child {
            Some(mut child) => Self::kill(&mut child),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
