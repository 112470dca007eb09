// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scratch directory harness for bootstrap and CLI tests.
//!
//! `TestHarness` owns a temp directory with front-end asset files (component
//! sources must exist on disk), a cache directory and optionally a config file.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use trellis_core::TrellisError;

/// Builder for creating test directories with configurable contents.
pub struct TestHarnessBuilder {
    assets: Vec<String>,
    config: Option<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            assets: Vec::new(),
            config: None,
        }
    }

    /// Create an asset file `assets/<name>` in the harness directory.
    pub fn with_asset(mut self, name: &str) -> Self {
        self.assets.push(name.to_string());
        self
    }

    /// Write `trellis.toml` with these contents. `{assets}` is replaced with
    /// the asset directory path so component sources can point into it.
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    pub fn build(self) -> Result<TestHarness, TrellisError> {
        let dir = TempDir::new().map_err(io_error)?;
        let assets_dir = dir.path().join("assets");
        fs::create_dir_all(&assets_dir).map_err(io_error)?;

        for asset in &self.assets {
            fs::write(assets_dir.join(asset), "export default {}\n").map_err(io_error)?;
        }

        let config_path = match self.config {
            Some(toml) => {
                let path = dir.path().join("trellis.toml");
                let assets = assets_dir.to_string_lossy().replace('\\', "/");
                fs::write(&path, toml.replace("{assets}", &assets)).map_err(io_error)?;
                Some(path)
            }
            None => None,
        };

        tracing::debug!(dir = %dir.path().display(), "test harness created");
        Ok(TestHarness {
            dir,
            assets_dir,
            config_path,
        })
    }
}

fn io_error(err: std::io::Error) -> TrellisError {
    TrellisError::Internal(format!("test harness: {err}"))
}

/// A temp directory removed when the harness is dropped.
pub struct TestHarness {
    dir: TempDir,
    assets_dir: PathBuf,
    config_path: Option<PathBuf>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of an asset, whether or not it was created.
    pub fn asset(&self, name: &str) -> PathBuf {
        self.assets_dir.join(name)
    }

    /// Directory suitable for `registry.cache_dir`.
    pub fn cache_dir(&self) -> PathBuf {
        self.dir.path().join("cache")
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
