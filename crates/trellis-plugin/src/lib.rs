// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry, component resolution and parameter contracts.
//!
//! Plugins are page-controller services bound to a content entity; components
//! are configured UI widgets attached to a plugin type, entity or interface
//! and to one view. The [`PluginRegistry`] answers which components apply to
//! a plugin and view, and keeps derived plugin metadata cached between runs.
//! [`Bootstrap`] wires the container, entity catalog, component factories and
//! configuration into a ready registry.

pub mod bootstrap;
pub mod cache;
pub mod catalog;
pub mod component;
pub mod container;
pub mod descriptor;
pub mod factory;
pub mod info;
pub mod naming;
pub mod page;
pub mod params;
pub mod registry;
pub mod snapshot;
pub mod validation;

pub use bootstrap::{
    AnyType, Bootstrap, KnownTypes, TypeResolver, compile_component, compile_components,
};
pub use cache::{FileStorage, MemoryStorage};
pub use catalog::EntityCatalog;
pub use component::{TEMPLATE_COMPONENT_TYPE, TemplateComponent};
pub use container::ServiceContainer;
pub use descriptor::{ComponentDescriptor, DEFAULT_POSITION};
pub use factory::{ComponentConstructor, ComponentFactories, ComponentResult};
pub use info::PluginInfoEntity;
pub use page::{RenderedComponent, RenderedPage};
pub use params::{ComponentParams, RawParam, RawValue, normalize_params};
pub use registry::{PLUGIN_INFO_CACHE_KEY, PluginRef, PluginRegistry};
pub use snapshot::{PluginSnapshot, services_fingerprint};
pub use validation::{validate_privilege, validate_privileges};
