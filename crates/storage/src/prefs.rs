// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value preferences backing
//!
//! Edits are staged with `put`/`remove` and become durable on `commit`.
//! Reads see staged edits immediately. A failed commit drops what was
//! staged, so a later commit never carries edits its caller gave up on.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors that can occur in storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not lock {path}: {source}")]
    Lock {
        path: String,
        source: std::io::Error,
    },
    #[error("timer has no id; insert it first")]
    MissingId,
}

/// A stored preference value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Int(i64),
    Bool(bool),
    Str(String),
    Set(BTreeSet<String>),
}

/// A key-value store with staged edits
pub trait Prefs {
    fn get(&self, key: &str) -> Option<PrefValue>;

    fn put(&mut self, key: &str, value: PrefValue);

    fn remove(&mut self, key: &str);

    /// Make staged edits durable; on failure they are discarded
    fn commit(&mut self) -> Result<(), StorageError>;

    /// Drop staged edits without writing them
    fn discard(&mut self);

    /// Pick up changes written by other handles; staged edits are kept
    fn reload(&mut self) -> Result<(), StorageError>;

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(PrefValue::Int(v)) => v,
            _ => default,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(PrefValue::Bool(v)) => v,
            _ => default,
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(PrefValue::Str(v)) => Some(v),
            _ => None,
        }
    }

    fn get_set(&self, key: &str) -> BTreeSet<String> {
        match self.get(key) {
            Some(PrefValue::Set(v)) => v,
            _ => BTreeSet::new(),
        }
    }
}

/// Staged edits: `Some` is a put, `None` a removal
pub(crate) type Pending = BTreeMap<String, Option<PrefValue>>;

pub(crate) fn apply_pending(values: &mut BTreeMap<String, PrefValue>, pending: &Pending) {
    for (key, edit) in pending {
        match edit {
            Some(value) => {
                values.insert(key.clone(), value.clone());
            }
            None => {
                values.remove(key);
            }
        }
    }
}

/// In-memory preferences
///
/// Clones share the same committed values, so a clone behaves like a second
/// process opening the same file.
#[derive(Clone, Default)]
pub struct MemoryPrefs {
    committed: Arc<Mutex<BTreeMap<String, PrefValue>>>,
    snapshot: BTreeMap<String, PrefValue>,
    pending: Pending,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed values, as another handle would see them
    pub fn committed(&self) -> BTreeMap<String, PrefValue> {
        self.committed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Prefs for MemoryPrefs {
    fn get(&self, key: &str) -> Option<PrefValue> {
        match self.pending.get(key) {
            Some(edit) => edit.clone(),
            None => self.snapshot.get(key).cloned(),
        }
    }

    fn put(&mut self, key: &str, value: PrefValue) {
        self.pending.insert(key.to_string(), Some(value));
    }

    fn remove(&mut self, key: &str) {
        self.pending.insert(key.to_string(), None);
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        let mut committed = self.committed.lock().unwrap_or_else(|e| e.into_inner());
        apply_pending(&mut committed, &self.pending);
        self.snapshot = committed.clone();
        self.pending.clear();
        Ok(())
    }

    fn discard(&mut self) {
        self.pending.clear();
    }

    fn reload(&mut self) -> Result<(), StorageError> {
        self.snapshot = self.committed();
        Ok(())
    }
}

#[cfg(test)]
#[path = "prefs_tests.rs"]
mod tests;
