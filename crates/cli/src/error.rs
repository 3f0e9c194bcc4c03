// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use chime_core::timer::{MAX_LENGTH, MIN_LENGTH};
use chime_core::TimerId;
use chime_engine::ModelError;
use std::fmt;
use std::time::Duration;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct ChimeError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ChimeError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for ChimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ChimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl ChimeError {
    /// No timer with this id exists in the store.
    pub fn timer_not_found(id: TimerId) -> Self {
        ChimeError::new(format!("Timer '{}' not found", id))
            .with_context("The timer may have been removed, or deleted after use")
            .with_suggestion("List timers: chime timer list")
    }

    /// A one-time alarm was asked for its previous occurrence.
    pub fn no_previous_occurrence() -> Self {
        ChimeError::new("One-time alarms have no previous occurrence")
            .with_suggestion("Describe a repeating alarm with --days, e.g. --days mon,wed,fri")
    }
}

/// Argument error for a timer length outside the supported range
pub fn length_out_of_range(length: Duration) -> String {
    format!(
        "{} is out of range; timers run from {} up to {}",
        humantime::format_duration(length),
        humantime::format_duration(Duration::from_millis(MIN_LENGTH.unsigned_abs())),
        humantime::format_duration(Duration::from_millis(MAX_LENGTH.unsigned_abs()))
    )
}

/// Translate model failures into user-facing errors
pub fn from_model(error: ModelError) -> anyhow::Error {
    match error {
        ModelError::UnknownTimer(id) => ChimeError::timer_not_found(id).into(),
        other => ChimeError::new("Failed to update the timer store")
            .with_context(other.to_string())
            .with_suggestion("Check that the data directory is writable (see --data-dir)")
            .with_source(other)
            .into(),
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
