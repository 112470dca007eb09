// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service container supplying plugin instances and typed services.
//!
//! Plugins are registered explicitly under a service id and looked up either
//! by that id or by their implementing type name. Other services are kept
//! under a type name (so the registry can tell "exists, but is not a plugin"
//! apart from "unknown") and under their Rust type for constructor injection.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use trellis_core::{Plugin, TrellisError};

type AnyService = Arc<dyn Any + Send + Sync>;

/// Prefix of the service ids generated by [`ServiceContainer::add_plugin`].
pub const PLUGIN_SERVICE_PREFIX: &str = "trellis.plugin.";

/// Explicit registry of plugin services and their dependencies.
#[derive(Default)]
pub struct ServiceContainer {
    plugins: HashMap<String, Arc<dyn Plugin>>,
    /// Service ids in registration order.
    plugin_order: Vec<String>,
    /// Plugin type name → service id.
    plugin_types: HashMap<String, String>,
    services: HashMap<String, AnyService>,
    typed: HashMap<TypeId, AnyService>,
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `plugin` under `service_id`.
    ///
    /// Service ids and plugin types are both unique within a container.
    pub fn register_plugin(
        &mut self,
        service_id: impl Into<String>,
        plugin: Arc<dyn Plugin>,
    ) -> Result<(), TrellisError> {
        let service_id = service_id.into();
        if self.plugins.contains_key(&service_id) {
            return Err(TrellisError::Config(format!(
                "service \"{service_id}\" is already registered"
            )));
        }
        let type_name = plugin.type_name().to_string();
        if let Some(existing) = self.plugin_types.get(&type_name) {
            return Err(TrellisError::Config(format!(
                "plugin type \"{type_name}\" is already registered as service \"{existing}\""
            )));
        }

        debug!(service = %service_id, plugin_type = %type_name, "registered plugin service");
        self.plugin_types.insert(type_name, service_id.clone());
        self.plugin_order.push(service_id.clone());
        self.plugins.insert(service_id, plugin);
        Ok(())
    }

    /// Register `plugin` under an id derived from its type name
    /// (`App\Plugin\ArticlePlugin` → `trellis.plugin.app.plugin.articleplugin`).
    pub fn add_plugin(&mut self, plugin: Arc<dyn Plugin>) -> Result<String, TrellisError> {
        let service_id = plugin_service_id(plugin.type_name());
        self.register_plugin(service_id.clone(), plugin)?;
        Ok(service_id)
    }

    /// Register a non-plugin service, reachable by `type_name` and by `T`.
    pub fn register_service<T>(&mut self, type_name: impl Into<String>, service: Arc<T>)
    where
        T: Any + Send + Sync,
    {
        let service: AnyService = service;
        self.typed.insert(TypeId::of::<T>(), Arc::clone(&service));
        self.services.insert(type_name.into(), service);
    }

    /// Ids of every registered plugin service, in registration order.
    pub fn plugin_services(&self) -> Vec<String> {
        self.plugin_order.clone()
    }

    pub fn plugin_by_service(&self, service_id: &str) -> Result<Arc<dyn Plugin>, TrellisError> {
        self.plugins
            .get(service_id)
            .cloned()
            .ok_or_else(|| TrellisError::PluginNotFound {
                name: service_id.to_string(),
            })
    }

    /// Plugin registered for `type_name`.
    ///
    /// A non-plugin service registered under that name is a contract
    /// violation rather than a missing plugin.
    pub fn plugin_by_type(&self, type_name: &str) -> Result<Arc<dyn Plugin>, TrellisError> {
        if let Some(service_id) = self.plugin_types.get(type_name) {
            return self.plugin_by_service(service_id);
        }
        if self.services.contains_key(type_name) {
            return Err(TrellisError::ContractViolation {
                type_name: type_name.to_string(),
                expected: "Plugin",
            });
        }
        Err(TrellisError::PluginNotFound {
            name: type_name.to_string(),
        })
    }

    pub fn is_plugin_type(&self, type_name: &str) -> bool {
        self.plugin_types.contains_key(type_name)
    }

    /// Whether anything is registered under `type_name`.
    pub fn has_type(&self, type_name: &str) -> bool {
        self.is_plugin_type(type_name) || self.services.contains_key(type_name)
    }

    /// Typed dependency lookup used by component factories.
    pub fn get<T>(&self) -> Result<Arc<T>, TrellisError>
    where
        T: Any + Send + Sync,
    {
        self.typed
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|service| service.downcast::<T>().ok())
            .ok_or_else(|| TrellisError::MissingService {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("plugins", &self.plugin_order)
            .field("services", &self.services.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn plugin_service_id(type_name: &str) -> String {
    let path = type_name
        .split(['\\', ':'])
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(".");
    format!("{PLUGIN_SERVICE_PREFIX}{path}")
}
