// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin capability: a page-controller service optionally bound to an entity.

use std::path::PathBuf;

use crate::error::TrellisError;
use crate::types::MenuItem;
use crate::view::PluginView;

/// A plugin service registered with the container.
///
/// Only [`type_name`](Plugin::type_name) and [`name`](Plugin::name) are
/// mandatory; the remaining metadata carries the defaults a bare plugin has.
pub trait Plugin: Send + Sync + 'static {
    /// Fully-qualified implementing type, e.g. `App\Plugin\ArticlePlugin`.
    ///
    /// Both `\` and `::` are accepted as namespace separators.
    fn type_name(&self) -> &str;

    /// Official plugin name.
    fn name(&self) -> &str;

    /// Name for menu and navigation.
    fn label(&self) -> &str {
        self.name()
    }

    /// Domain entity this plugin is about (for ex. Article, Product, ...).
    fn base_entity(&self) -> Option<&str> {
        None
    }

    fn priority(&self) -> i32 {
        1
    }

    fn icon(&self) -> Option<&str> {
        None
    }

    fn roles(&self) -> Vec<String> {
        Vec::new()
    }

    fn privileges(&self) -> Vec<String> {
        Vec::new()
    }

    fn menu_item(&self) -> Option<MenuItem> {
        None
    }

    /// Directory holding the plugin's templates and assets, if any.
    fn base_path(&self) -> Option<PathBuf> {
        None
    }

    /// Hook invoked before the view's components render. This is where a
    /// plugin fills in title, buttons and breadcrumbs, or returns
    /// [`PluginView::redirect`] and friends to end the request early.
    fn before_render(&self, _view: &mut PluginView) -> Result<(), TrellisError> {
        Ok(())
    }

    /// Hook invoked after every component rendered.
    fn after_render(&self, _view: &mut PluginView) -> Result<(), TrellisError> {
        Ok(())
    }
}

impl std::fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("type_name", &self.type_name())
            .field("name", &self.name())
            .finish()
    }
}
