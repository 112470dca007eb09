// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component descriptors: the registered, immutable form of one component.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::component::TEMPLATE_COMPONENT_TYPE;
use crate::params::ComponentParams;

/// Position given to components that do not declare one.
pub const DEFAULT_POSITION: i32 = 1;

/// Describes one registrable UI component.
///
/// Built once at bootstrap and never mutated; `key` should be unique within
/// a registry, which is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Registration key, also the default name and tab.
    pub key: String,
    /// Element name the template component renders (`<article-content>`).
    pub name: String,
    /// Plugin type, entity type or interface this component activates for.
    pub implements: String,
    /// Implementation type resolved through the component factories.
    pub component_type: String,
    /// View the component is shown in (`detail`, `default`, ...).
    pub view: String,
    /// Front-end asset bundle; checked to exist at compile time.
    pub source: PathBuf,
    /// Sort weight; higher renders first.
    pub position: i32,
    pub tab: String,
    /// Parameter contract, in declaration order.
    pub params: ComponentParams,
}

impl ComponentDescriptor {
    /// Descriptor with default name, tab, position, implementation and no params.
    pub fn new(
        key: impl Into<String>,
        implements: impl Into<String>,
        view: impl Into<String>,
        source: impl Into<PathBuf>,
    ) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            tab: key.clone(),
            key,
            implements: implements.into(),
            component_type: TEMPLATE_COMPONENT_TYPE.to_string(),
            view: view.into(),
            source: source.into(),
            position: DEFAULT_POSITION,
            params: ComponentParams::new(),
        }
    }

    /// Sets the display name; a blank name keeps the key.
    pub fn with_name(mut self, name: &str) -> Self {
        let name = name.trim();
        self.name = if name.is_empty() {
            self.key.clone()
        } else {
            name.to_string()
        };
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = tab.into();
        self
    }

    pub fn with_component_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = component_type.into();
        self
    }

    pub fn with_params(mut self, params: ComponentParams) -> Self {
        self.params = params;
        self
    }

    /// Whether this component applies to `view` (`None` matches every view).
    pub fn matches_view(&self, view: Option<&str>) -> bool {
        view.is_none_or(|v| v == self.view)
    }
}
