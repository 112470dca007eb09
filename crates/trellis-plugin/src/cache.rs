// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cache stores for derived plugin metadata.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use trellis_core::{CacheStorage, TrellisError};

fn cache_error(err: impl std::error::Error + Send + Sync + 'static) -> TrellisError {
    TrellisError::Cache {
        source: Box::new(err),
    }
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, TrellisError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| TrellisError::Internal("memory cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: serde_json::Value) -> Result<(), TrellisError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| TrellisError::Internal("memory cache lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One JSON file per key under `<dir>/<namespace>/`.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so readers see either the old or the new entry.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>, namespace: &str) -> Self {
        Self {
            dir: dir.as_ref().join(namespace),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
                _ => '_',
            })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl CacheStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, TrellisError> {
        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(cache_error(e)),
        };
        // A torn or hand-edited file is a miss; the next save replaces it.
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "cache entry is not valid JSON, ignoring"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, key: &str, value: serde_json::Value) -> Result<(), TrellisError> {
        fs::create_dir_all(&self.dir).map_err(cache_error)?;
        let path = self.entry_path(key);

        let mut file = NamedTempFile::new_in(&self.dir).map_err(cache_error)?;
        serde_json::to_writer(&mut file, &value)?;
        file.flush().map_err(cache_error)?;
        file.persist(&path).map_err(cache_error)?;

        debug!(path = %path.display(), "cache entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn memory_storage_round_trips() {
        let storage = MemoryStorage::new();
        assert!(storage.load("plugin-info").unwrap().is_none());
        storage.save("plugin-info", json!({"hash": "x"})).unwrap();
        assert_eq!(storage.load("plugin-info").unwrap(), Some(json!({"hash": "x"})));
    }

    #[test]
    fn file_storage_writes_under_namespace() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path(), "plugin-manager");
        assert!(storage.load("plugin-info").unwrap().is_none());

        storage.save("plugin-info", json!({"hash": "x"})).unwrap();
        assert!(tmp.path().join("plugin-manager/plugin-info.json").is_file());
        assert_eq!(storage.load("plugin-info").unwrap(), Some(json!({"hash": "x"})));

        storage.save("plugin-info", json!({"hash": "y"})).unwrap();
        assert_eq!(storage.load("plugin-info").unwrap(), Some(json!({"hash": "y"})));
    }

    #[test]
    fn truncated_entry_is_a_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path(), "ns");
        fs::create_dir_all(storage.dir()).unwrap();
        fs::write(storage.dir().join("plugin-info.json"), r#"{"hash": "trunc"#).unwrap();

        assert!(storage.load("plugin-info").unwrap().is_none());
    }

    #[test]
    fn unreadable_entry_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path(), "ns");
        // A directory where the entry file should be cannot be read as a string.
        fs::create_dir_all(storage.dir().join("plugin-info.json")).unwrap();

        let err = storage.load("plugin-info").unwrap_err();
        assert!(matches!(err, TrellisError::Cache { .. }));
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let storage = FileStorage::new("/cache", "ns");
        assert_eq!(
            storage.entry_path("a/b:c"),
            PathBuf::from("/cache/ns/a_b_c.json")
        );
    }

    #[test]
    fn corrupt_file_is_a_cache_error() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path(), "ns");
        fs::create_dir_all(storage.dir()).unwrap();
        fs::write(storage.dir().join("plugin-info.json"), "{not json").unwrap();
        assert!(matches!(
            storage.load("plugin-info"),
            Err(TrellisError::Cache { .. })
        ));
    }
}
