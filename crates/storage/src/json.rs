// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-backed preferences
//!
//! The whole store is one JSON object. Commits take an exclusive advisory
//! lock on a sidecar file, re-read the document, apply staged edits on top
//! and atomically replace the file, so several processes can share it.

use crate::prefs::{apply_pending, Pending, PrefValue, Prefs, StorageError};
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// JSON file-backed preferences
pub struct JsonFilePrefs {
    path: PathBuf,
    lock_path: PathBuf,
    snapshot: BTreeMap<String, PrefValue>,
    pending: Pending,
}

impl JsonFilePrefs {
    /// Open (or create on first commit) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let lock_path = path.with_extension("lock");
        let mut prefs = Self {
            path,
            lock_path,
            snapshot: BTreeMap::new(),
            pending: Pending::new(),
        };
        prefs.reload()?;
        Ok(prefs)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self, exclusive: bool) -> Result<File, StorageError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        let locked = if exclusive {
            file.lock_exclusive()
        } else {
            file.lock_shared()
        };
        locked.map_err(|source| StorageError::Lock {
            path: self.lock_path.display().to_string(),
            source,
        })?;
        Ok(file)
    }

    fn read_document(&self) -> Result<BTreeMap<String, PrefValue>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, values: &BTreeMap<String, PrefValue>) -> Result<(), StorageError> {
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(serde_json::to_string_pretty(values)?.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Prefs for JsonFilePrefs {
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
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending);
        let lock = self.lock(true)?;
        let mut values = self.read_document()?;
        apply_pending(&mut values, &pending);
        self.write_document(&values)?;
        drop(lock);

        tracing::debug!(path = %self.path.display(), edits = pending.len(), "committed");
        self.snapshot = values;
        Ok(())
    }

    fn discard(&mut self) {
        self.pending.clear();
    }

    fn reload(&mut self) -> Result<(), StorageError> {
        let lock = self.lock(false)?;
        self.snapshot = self.read_document()?;
        drop(lock);
        Ok(())
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
