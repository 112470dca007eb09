// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap wiring: component compilation and registry assembly.
//!
//! Configuration declares components by type name; compiling checks those
//! names against what the process actually registered, confirms the asset
//! files exist and normalizes the parameter contracts. [`Bootstrap`] is the
//! composition root that owns the container, catalog and factories until the
//! registry is built.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};
use trellis_config::{ComponentConfig, TrellisConfig};
use trellis_core::{CacheStorage, LinkGenerator, Plugin, TrellisError};

use crate::cache::{FileStorage, MemoryStorage};
use crate::catalog::EntityCatalog;
use crate::component::TEMPLATE_COMPONENT_TYPE;
use crate::container::ServiceContainer;
use crate::descriptor::{ComponentDescriptor, DEFAULT_POSITION};
use crate::factory::{ComponentFactories, ComponentResult};
use crate::params::{RawParam, normalize_params};
use crate::registry::PluginRegistry;

/// Answers whether a type name named in `implements` exists.
pub trait TypeResolver {
    fn is_known(&self, type_name: &str) -> bool;
}

/// Types registered in a container (plugins and services) or a catalog
/// (entities and their interfaces).
pub struct KnownTypes<'a> {
    pub container: &'a ServiceContainer,
    pub catalog: &'a EntityCatalog,
}

impl TypeResolver for KnownTypes<'_> {
    fn is_known(&self, type_name: &str) -> bool {
        self.container.has_type(type_name) || self.catalog.knows(type_name)
    }
}

/// Accepts every type name. For linting configuration outside the host
/// process, where plugin types are not registered.
pub struct AnyType;

impl TypeResolver for AnyType {
    fn is_known(&self, _type_name: &str) -> bool {
        true
    }
}

fn component_error(key: &str, message: String) -> TrellisError {
    TrellisError::Config(format!("component \"{key}\": {message}"))
}

/// Compile one configured component into its descriptor.
pub fn compile_component(
    config: &ComponentConfig,
    types: &dyn TypeResolver,
    factories: &ComponentFactories,
    default_position: i32,
) -> Result<ComponentDescriptor, TrellisError> {
    let key = config.key.trim();
    if key.is_empty() {
        return Err(TrellisError::Config(
            "component key must not be empty".to_string(),
        ));
    }

    if !types.is_known(&config.implements) {
        return Err(component_error(
            key,
            format!(
                "type \"{}\" declared in implements does not exist",
                config.implements
            ),
        ));
    }

    let component_type = config
        .component_type
        .as_deref()
        .unwrap_or(TEMPLATE_COMPONENT_TYPE);
    if !factories.contains(component_type) {
        return Err(component_error(
            key,
            format!("component type \"{component_type}\" is not registered"),
        ));
    }

    if !Path::new(&config.source).is_file() {
        return Err(component_error(
            key,
            format!("source file \"{}\" does not exist", config.source),
        ));
    }

    let raw: Vec<RawParam> = config.params.iter().map(RawParam::from).collect();
    let params = normalize_params(key, &raw)?;

    let descriptor = ComponentDescriptor::new(key, &config.implements, &config.view, &config.source)
        .with_name(&config.name)
        .with_component_type(component_type)
        .with_position(config.position.unwrap_or(default_position))
        .with_tab(config.tab.as_deref().unwrap_or(key))
        .with_params(params);

    debug!(
        key = %descriptor.key,
        implements = %descriptor.implements,
        view = %descriptor.view,
        position = descriptor.position,
        "compiled component"
    );
    Ok(descriptor)
}

/// Compile configured components in declaration order; the first invalid
/// component fails the whole list.
pub fn compile_components(
    configs: &[ComponentConfig],
    types: &dyn TypeResolver,
    factories: &ComponentFactories,
    default_position: i32,
) -> Result<Vec<ComponentDescriptor>, TrellisError> {
    configs
        .iter()
        .map(|config| compile_component(config, types, factories, default_position))
        .collect()
}

/// Builder assembling a [`PluginRegistry`] from explicit registrations and
/// configuration.
pub struct Bootstrap {
    container: ServiceContainer,
    plugins: Vec<(Option<String>, Arc<dyn Plugin>)>,
    catalog: EntityCatalog,
    factories: ComponentFactories,
    cache: Option<Arc<dyn CacheStorage>>,
    configs: Vec<ComponentConfig>,
    descriptors: Vec<ComponentDescriptor>,
    default_position: i32,
    link_generator: Option<Arc<dyn LinkGenerator>>,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self {
            container: ServiceContainer::new(),
            plugins: Vec::new(),
            catalog: EntityCatalog::new(),
            factories: ComponentFactories::new(),
            cache: None,
            configs: Vec::new(),
            descriptors: Vec::new(),
            default_position: DEFAULT_POSITION,
            link_generator: None,
        }
    }

    /// Registry settings and components from a loaded configuration. The
    /// cache is file-backed when `registry.cache_dir` is set.
    pub fn from_config(config: &TrellisConfig) -> Self {
        let registry = &config.registry;
        let cache: Arc<dyn CacheStorage> = match &registry.cache_dir {
            Some(dir) => Arc::new(FileStorage::new(dir, &registry.cache_namespace)),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::new()
            .cache(cache)
            .default_position(registry.default_position)
            .components(config.components.iter().cloned())
    }

    /// Register a plugin under an id derived from its type.
    pub fn plugin(mut self, plugin: impl Plugin) -> Self {
        let plugin: Arc<dyn Plugin> = Arc::new(plugin);
        self.plugins.push((None, plugin));
        self
    }

    pub fn plugin_service(mut self, service_id: &str, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push((Some(service_id.to_string()), plugin));
        self
    }

    pub fn service<T>(mut self, type_name: &str, service: Arc<T>) -> Self
    where
        T: std::any::Any + Send + Sync,
    {
        self.container.register_service(type_name, service);
        self
    }

    pub fn entity<I, S>(mut self, entity: &str, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog.register(entity, interfaces);
        self
    }

    pub fn component_type<F>(mut self, component_type: &str, constructor: F) -> Self
    where
        F: Fn(&ComponentDescriptor, &ServiceContainer) -> ComponentResult + Send + Sync + 'static,
    {
        self.factories.register(component_type, constructor);
        self
    }

    pub fn cache(mut self, cache: Arc<dyn CacheStorage>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Router used by [`PluginView::link`](trellis_core::PluginView::link).
    pub fn link_generator(mut self, generator: Arc<dyn LinkGenerator>) -> Self {
        self.link_generator = Some(generator);
        self
    }

    pub fn default_position(mut self, position: i32) -> Self {
        self.default_position = position;
        self
    }

    /// Components to compile at build time.
    pub fn components(mut self, configs: impl IntoIterator<Item = ComponentConfig>) -> Self {
        self.configs.extend(configs);
        self
    }

    /// Already-built descriptors, registered before compiled ones.
    pub fn descriptors(
        mut self,
        descriptors: impl IntoIterator<Item = ComponentDescriptor>,
    ) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    /// Register plugins, compile components and load plugin metadata.
    pub fn build(mut self) -> Result<PluginRegistry, TrellisError> {
        for (service_id, plugin) in self.plugins {
            match service_id {
                Some(id) => self.container.register_plugin(id, plugin)?,
                None => {
                    self.container.add_plugin(plugin)?;
                }
            }
        }

        let compiled = compile_components(
            &self.configs,
            &KnownTypes {
                container: &self.container,
                catalog: &self.catalog,
            },
            &self.factories,
            self.default_position,
        )?;

        let services = self.container.plugin_services();
        let cache: Arc<dyn CacheStorage> = match self.cache {
            Some(cache) => cache,
            None => Arc::new(MemoryStorage::new()),
        };
        let mut registry = PluginRegistry::new(
            Arc::new(self.container),
            self.catalog,
            self.factories,
            cache,
        );
        if let Some(generator) = self.link_generator {
            registry.context().set_link_generator(generator)?;
        }
        registry.refresh_plugin_services(&services)?;
        registry.add_components(self.descriptors);
        registry.add_components(compiled);

        info!(
            plugins = services.len(),
            components = registry.components_info().len(),
            "plugin registry ready"
        );
        Ok(registry)
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}
