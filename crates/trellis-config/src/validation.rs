// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks shape constraints serde cannot express. Anything that needs the
//! live registry (known types, asset files, parameter contracts) is checked
//! when components are compiled at bootstrap.

use crate::diagnostic::ConfigError;
use crate::model::TrellisConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &TrellisConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.registry.log_level.trim();
    if !LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "registry.log_level `{level}` is not one of: {}",
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let namespace = config.registry.cache_namespace.trim();
    if namespace.is_empty() {
        errors.push(ConfigError::Validation {
            message: "registry.cache_namespace must not be empty".to_string(),
        });
    } else if namespace.contains(['/', '\\']) || namespace == ".." {
        errors.push(ConfigError::Validation {
            message: format!(
                "registry.cache_namespace `{namespace}` must be a single directory name"
            ),
        });
    }

    if let Some(dir) = &config.registry.cache_dir
        && dir.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "registry.cache_dir must not be empty when set".to_string(),
        });
    }

    for (i, component) in config.components.iter().enumerate() {
        if component.key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("components[{i}].key must not be empty"),
            });
        }
        let label = if component.key.trim().is_empty() {
            format!("components[{i}]")
        } else {
            format!("component `{}`", component.key)
        };
        for (field, value) in [
            ("implements", &component.implements),
            ("view", &component.view),
            ("source", &component.source),
        ] {
            if value.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("{label}: `{field}` must not be empty"),
                });
            }
        }
        if let Some(component_type) = &component.component_type
            && component_type.trim().is_empty()
        {
            errors.push(ConfigError::Validation {
                message: format!("{label}: `component_type` must not be empty when set"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
