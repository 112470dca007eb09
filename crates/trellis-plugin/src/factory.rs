// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component factories keyed by component type name.
//!
//! A descriptor names its implementation as a string; the factory table maps
//! that name to a constructor. Constructors receive the service container and
//! resolve their own dependencies before building the component.

use std::collections::HashMap;
use std::sync::Arc;

use trellis_core::{PluginComponent, TrellisError};

use crate::component::{TEMPLATE_COMPONENT_TYPE, TemplateComponent};
use crate::container::ServiceContainer;
use crate::descriptor::ComponentDescriptor;

/// What a constructor returns.
pub type ComponentResult = Result<Box<dyn PluginComponent>, TrellisError>;

/// Constructor building one component instance from its descriptor.
pub type ComponentConstructor =
    Arc<dyn Fn(&ComponentDescriptor, &ServiceContainer) -> ComponentResult + Send + Sync>;

/// Table of component constructors.
#[derive(Clone)]
pub struct ComponentFactories {
    constructors: HashMap<String, ComponentConstructor>,
}

impl ComponentFactories {
    /// Factories with the built-in [`TemplateComponent`] registered.
    pub fn new() -> Self {
        let mut factories = Self::empty();
        factories.register(TEMPLATE_COMPONENT_TYPE, |descriptor, _| {
            Ok(Box::new(TemplateComponent::from_descriptor(descriptor)))
        });
        factories
    }

    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register a constructor; an existing one for the same type is replaced.
    pub fn register<F>(&mut self, component_type: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&ComponentDescriptor, &ServiceContainer) -> ComponentResult + Send + Sync + 'static,
    {
        self.constructors
            .insert(component_type.into(), Arc::new(constructor));
        self
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.constructors.contains_key(component_type)
    }

    /// Instantiate the component described by `descriptor`.
    pub fn create(
        &self,
        descriptor: &ComponentDescriptor,
        container: &ServiceContainer,
    ) -> Result<Box<dyn PluginComponent>, TrellisError> {
        let constructor = self
            .constructors
            .get(&descriptor.component_type)
            .ok_or_else(|| {
                TrellisError::Config(format!(
                    "component \"{}\": component type \"{}\" is not registered",
                    descriptor.key, descriptor.component_type
                ))
            })?;
        constructor(descriptor, container)
    }

    pub fn component_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl Default for ComponentFactories {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ComponentFactories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentFactories")
            .field("component_types", &self.component_types())
            .finish()
    }
}
