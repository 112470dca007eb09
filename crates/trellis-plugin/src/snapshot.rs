// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived plugin metadata, built from the container and cached as one value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{error, warn};
use trellis_core::TrellisError;

use crate::container::ServiceContainer;
use crate::info::PluginInfoEntity;
use crate::naming::routing_short_name;
use crate::validation::validate_privileges;

/// Everything the registry derives from the plugin-service list.
///
/// Replaced as a whole; readers never observe a half-built snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSnapshot {
    /// Fingerprint of the service list this snapshot was built from.
    pub hash: String,
    /// Plugin metadata in service order.
    pub plugins: Vec<PluginInfoEntity>,
    pub base_entity_to_plugin: BTreeMap<String, String>,
    /// Short base-entity name → plugin type, used for routing.
    pub base_entity_simple_to_plugin: BTreeMap<String, String>,
    /// Derived plugin name → plugin type.
    pub name_to_type: BTreeMap<String, String>,
}

impl PluginSnapshot {
    /// Resolve every service in `services` and derive the snapshot.
    ///
    /// Fails on unknown services, invalid privileges, and on two different
    /// plugin types whose base entities share a short name.
    pub fn build(
        hash: String,
        services: &[String],
        container: &ServiceContainer,
    ) -> Result<Self, TrellisError> {
        let mut snapshot = PluginSnapshot {
            hash,
            ..Self::default()
        };

        for service in services {
            let plugin = container.plugin_by_service(service)?;
            let plugin_type = plugin.type_name().to_string();
            validate_privileges(&plugin.privileges())?;

            if let Some(entity) = plugin.base_entity() {
                snapshot
                    .base_entity_to_plugin
                    .insert(entity.to_string(), plugin_type.clone());

                if let Some(short_name) = routing_short_name(entity) {
                    match snapshot.base_entity_simple_to_plugin.get(short_name) {
                        Some(existing) if *existing != plugin_type => {
                            error!(
                                short_name,
                                existing = %existing,
                                conflicting = %plugin_type,
                                "ambiguous plugin routing"
                            );
                            return Err(TrellisError::AmbiguousRouting {
                                short_name: short_name.to_string(),
                                existing: existing.clone(),
                                conflicting: plugin_type,
                            });
                        }
                        Some(_) => {}
                        None => {
                            snapshot
                                .base_entity_simple_to_plugin
                                .insert(short_name.to_string(), plugin_type.clone());
                        }
                    }
                }
            }

            let info = PluginInfoEntity::from_plugin(service, plugin.as_ref());
            if let Some(previous) = snapshot
                .name_to_type
                .insert(info.name.clone(), plugin_type.clone())
                .filter(|previous| *previous != plugin_type)
            {
                warn!(
                    name = %info.name,
                    previous = %previous,
                    plugin_type = %plugin_type,
                    "plugin name reassigned to another type"
                );
            }
            snapshot.plugins.push(info);
        }

        Ok(snapshot)
    }

    pub fn plugin(&self, plugin_type: &str) -> Option<&PluginInfoEntity> {
        self.plugins.iter().find(|info| info.type_name == plugin_type)
    }
}

/// Order-sensitive fingerprint of a plugin-service list.
pub fn services_fingerprint(services: &[String]) -> String {
    hex::encode(Sha256::digest(services.join("|").as_bytes()))
}
