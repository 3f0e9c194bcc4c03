// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration
//!
//! Settings live in `chime.toml` inside the data directory. Every section
//! is optional; a missing file yields the defaults.

mod timer;

pub use timer::TimerSettings;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the configuration inside the data directory
pub const CONFIG_FILE: &str = "chime.toml";

/// File name of the timer store inside the data directory
pub const STORE_FILE: &str = "timers.json";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "CHIME_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not determine a data directory; set {DATA_DIR_ENV}")]
    NoDataDir,
}

/// Which desktop notification backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifyBackend {
    #[default]
    None,
    NotifySend,
    Osascript,
}

/// Desktop notification settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifySettings {
    pub backend: NotifyBackend,
}

/// External player used to sound the ringer
///
/// `{ringtone}` in any argument is replaced by the ringtone URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingerSettings {
    pub command: Option<Vec<String>>,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChimeConfig {
    pub timer: TimerSettings,
    pub ringer: RingerSettings,
    pub notify: NotifySettings,
}

impl ChimeConfig {
    /// Load `chime.toml` from the data directory
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Resolve the data directory: explicit path, then `CHIME_DATA_DIR`, then
/// the platform data directory
pub fn data_dir(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::data_dir()
        .map(|dir| dir.join("chime"))
        .ok_or(ConfigError::NoDataDir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
