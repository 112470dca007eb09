// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output of one plugin view render.

use serde::Serialize;
use trellis_core::PluginView;

/// A component rendered into markup, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedComponent {
    pub key: String,
    /// Tab the component is shown under.
    pub tab: String,
    pub html: String,
}

/// Everything the host needs to assemble a plugin page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    /// Type of the plugin that handled the request.
    pub plugin: String,
    pub view: String,
    /// Title, toolbar and navigation set by the plugin's hooks.
    pub state: PluginView,
    pub components: Vec<RenderedComponent>,
}

impl RenderedPage {
    /// Distinct tab names in the order their first component appears.
    pub fn tabs(&self) -> Vec<&str> {
        let mut tabs: Vec<&str> = Vec::new();
        for component in &self.components {
            if !tabs.contains(&component.tab.as_str()) {
                tabs.push(&component.tab);
            }
        }
        tabs
    }
}
