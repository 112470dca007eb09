// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Trellis plugin registry.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Trellis configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrellisConfig {
    /// Registry behavior and cache settings.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Declared UI components, in registration order.
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

/// Registry behavior and cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for the file cache store. `None` keeps the cache in memory.
    #[serde(default)]
    pub cache_dir: Option<String>,

    /// Namespace (sub-directory) the registry's cache entries live under.
    #[serde(default = "default_cache_namespace")]
    pub cache_namespace: String,

    /// Position assigned to components that do not declare one.
    #[serde(default = "default_position")]
    pub default_position: i32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            cache_dir: None,
            cache_namespace: default_cache_namespace(),
            default_position: default_position(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cache_namespace() -> String {
    "plugin-manager".to_string()
}

fn default_position() -> i32 {
    1
}

/// One `[[components]]` entry.
///
/// Parameters stay as raw TOML values here; the registry's parameter
/// validator turns them into a canonical contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    /// Unique stable identifier.
    pub key: String,

    /// Display name. Blank falls back to `key`.
    #[serde(default)]
    pub name: String,

    /// Plugin type, entity type or interface the component activates for.
    pub implements: String,

    /// Implementation type registered with the component factories.
    /// Defaults to the built-in template component.
    #[serde(default)]
    pub component_type: Option<String>,

    /// View name within the plugin.
    pub view: String,

    /// Path to the front-end asset bundle.
    pub source: String,

    /// Sort weight; higher renders first.
    #[serde(default)]
    pub position: Option<i32>,

    /// Tab grouping label. Defaults to `key`.
    #[serde(default)]
    pub tab: Option<String>,

    /// Parameter declarations: `"name"`, `"?name"` or `{ name = default }`.
    #[serde(default)]
    pub params: Vec<toml::Value>,
}

impl ComponentConfig {
    /// Minimal declaration with every optional section left out.
    pub fn new(
        key: impl Into<String>,
        implements: impl Into<String>,
        view: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: String::new(),
            implements: implements.into(),
            component_type: None,
            view: view.into(),
            source: source.into(),
            position: None,
            tab: None,
            params: Vec::new(),
        }
    }
}
