// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renderable component capability.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::TrellisError;
use crate::traits::plugin::Plugin;

/// Per-request data a component renders with. The registry never sees it.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Query parameters of the current request.
    pub query: &'a BTreeMap<String, String>,
    /// The plugin whose view is being rendered.
    pub plugin: Option<&'a dyn Plugin>,
}

impl<'a> RenderContext<'a> {
    pub fn new(query: &'a BTreeMap<String, String>) -> Self {
        Self {
            query,
            plugin: None,
        }
    }

    pub fn with_plugin(mut self, plugin: &'a dyn Plugin) -> Self {
        self.plugin = Some(plugin);
        self
    }
}

/// A UI widget instantiated from a component descriptor.
pub trait PluginComponent: Send + Sync {
    fn key(&self) -> &str;

    fn name(&self) -> &str;

    /// Tab name.
    fn tab(&self) -> &str;

    /// Real source path to the front-end asset bundle.
    fn source(&self) -> &Path;

    /// Sort weight; higher renders first.
    fn position(&self) -> i32;

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, TrellisError>;
}

impl std::fmt::Debug for dyn PluginComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginComponent")
            .field("key", &self.key())
            .field("position", &self.position())
            .finish()
    }
}
