// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory cache store that records how often it is used.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use trellis_core::{CacheStorage, TrellisError};

/// Cache store counting loads and saves, for warm/cold path assertions.
#[derive(Debug, Default)]
pub struct CountingStorage {
    entries: Mutex<HashMap<String, serde_json::Value>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl CountingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `value` under `key`, e.g. a stale or corrupt snapshot.
    pub fn seeded(key: &str, value: serde_json::Value) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.to_string(), value);
        }
        storage
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Raw value stored under `key`, bypassing the counters.
    pub fn peek(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl CacheStorage for CountingStorage {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, TrellisError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let entries = self
            .entries
            .lock()
            .map_err(|_| TrellisError::Internal("counting cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: serde_json::Value) -> Result<(), TrellisError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| TrellisError::Internal("counting cache lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
