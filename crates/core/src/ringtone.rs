// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ringtone references

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sound played when a timer or alarm fires
///
/// Serialized as `"default"`, `"silent"`, or the sound's URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ringtone {
    #[default]
    Default,
    Silent,
    Custom(String),
}

impl Ringtone {
    pub fn is_silent(&self) -> bool {
        matches!(self, Ringtone::Silent)
    }

    /// URI of a custom sound
    pub fn uri(&self) -> Option<&str> {
        match self {
            Ringtone::Custom(uri) => Some(uri),
            _ => None,
        }
    }
}

impl From<String> for Ringtone {
    fn from(s: String) -> Self {
        match s.trim() {
            "" | "default" => Ringtone::Default,
            "silent" => Ringtone::Silent,
            uri => Ringtone::Custom(uri.to_string()),
        }
    }
}

impl From<Ringtone> for String {
    fn from(ringtone: Ringtone) -> Self {
        ringtone.to_string()
    }
}

impl FromStr for Ringtone {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Ringtone::from(s.to_string()))
    }
}

impl fmt::Display for Ringtone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ringtone::Default => write!(f, "default"),
            Ringtone::Silent => write!(f, "silent"),
            Ringtone::Custom(uri) => write!(f, "{}", uri),
        }
    }
}
