// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy, `./trellis.toml` > `~/.config/trellis/trellis.toml`
//! > `/etc/trellis/trellis.toml`, with environment variable overrides via the
//! `TRELLIS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is not ours to box

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TrellisConfig;

pub(crate) const LOCAL_CONFIG: &str = "trellis.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/trellis/trellis.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("trellis").join(LOCAL_CONFIG))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/trellis/trellis.toml` (system-wide)
/// 3. `~/.config/trellis/trellis.toml` (user XDG config)
/// 4. `./trellis.toml` (local directory)
/// 5. `TRELLIS_*` environment variables
pub fn load_config() -> Result<TrellisConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TrellisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TrellisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `TRELLIS_REGISTRY_<KEY>` to `registry.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that keys containing
/// underscores (`cache_dir`, `log_level`) stay intact. The key reaches the
/// mapper with its original casing, so it is lower-cased first. Components
/// cannot be declared through the environment.
fn env_provider() -> Env {
    Env::prefixed("TRELLIS_").map(|key| {
        key.as_str()
            .to_lowercase()
            .replacen("registry_", "registry.", 1)
            .into()
    })
}
