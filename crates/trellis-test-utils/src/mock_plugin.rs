// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugin for registry tests.
//!
//! `MockPlugin` implements `Plugin` with metadata set through a builder, and
//! counts lifecycle hook invocations so tests can assert on them. Its
//! `before_render` hook can also set a title and breadcrumbs, or redirect.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use trellis_core::{Breadcrumb, MenuItem, Plugin, PluginView, TrellisError};

/// A plugin whose every piece of metadata is configurable.
#[derive(Debug, Default)]
pub struct MockPlugin {
    type_name: String,
    name: String,
    label: Option<String>,
    base_entity: Option<String>,
    priority: i32,
    icon: Option<String>,
    roles: Vec<String>,
    privileges: Vec<String>,
    menu_item: Option<MenuItem>,
    base_path: Option<PathBuf>,
    title: Option<String>,
    breadcrumbs: Vec<(String, Option<String>)>,
    redirect: Option<String>,
    before_render_calls: AtomicUsize,
    after_render_calls: AtomicUsize,
}

impl MockPlugin {
    /// Create a mock for `type_name`; its name is the type's last path segment.
    pub fn new(type_name: &str) -> Self {
        let name = type_name
            .rsplit(['\\', ':'])
            .next()
            .unwrap_or(type_name)
            .to_string();
        Self {
            type_name: type_name.to_string(),
            name,
            priority: 1,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_base_entity(mut self, entity: &str) -> Self {
        self.base_entity = Some(entity.to_string());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_privileges(mut self, privileges: &[&str]) -> Self {
        self.privileges = privileges.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_menu_item(mut self, menu_item: MenuItem) -> Self {
        self.menu_item = Some(menu_item);
        self
    }

    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Title set on every view this plugin renders.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Breadcrumb appended to every view this plugin renders.
    pub fn with_breadcrumb(mut self, label: &str, href: Option<&str>) -> Self {
        self.breadcrumbs
            .push((label.to_string(), href.map(str::to_string)));
        self
    }

    /// Make `before_render` redirect to `path` instead of rendering.
    pub fn with_redirect(mut self, path: &str) -> Self {
        self.redirect = Some(path.to_string());
        self
    }

    /// Number of `before_render` calls so far.
    pub fn before_render_calls(&self) -> usize {
        self.before_render_calls.load(Ordering::SeqCst)
    }

    /// Number of `after_render` calls so far.
    pub fn after_render_calls(&self) -> usize {
        self.after_render_calls.load(Ordering::SeqCst)
    }
}

impl Plugin for MockPlugin {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    fn base_entity(&self) -> Option<&str> {
        self.base_entity.as_deref()
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    fn roles(&self) -> Vec<String> {
        self.roles.clone()
    }

    fn privileges(&self) -> Vec<String> {
        self.privileges.clone()
    }

    fn menu_item(&self) -> Option<MenuItem> {
        self.menu_item.clone()
    }

    fn base_path(&self) -> Option<PathBuf> {
        self.base_path.clone()
    }

    fn before_render(&self, view: &mut PluginView) -> Result<(), TrellisError> {
        self.before_render_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(path) = &self.redirect {
            return view.redirect(path);
        }
        if let Some(title) = &self.title {
            view.set_title(title.as_str());
        }
        for (label, href) in &self.breadcrumbs {
            view.add_breadcrumb(Breadcrumb::new(label.as_str(), href.as_deref()));
        }
        Ok(())
    }

    fn after_render(&self, _view: &mut PluginView) -> Result<(), TrellisError> {
        self.after_render_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use trellis_core::Context;

    use super::*;

    #[test]
    fn name_defaults_to_last_segment() {
        assert_eq!(MockPlugin::new("App\\Plugin\\ArticlePlugin").name(), "ArticlePlugin");
        assert_eq!(MockPlugin::new("shop::ProductPlugin").name(), "ProductPlugin");
        assert_eq!(MockPlugin::new("Bare").name(), "Bare");
    }

    #[test]
    fn builder_sets_metadata() {
        let plugin = MockPlugin::new("App\\Plugin\\ArticlePlugin")
            .with_name("Articles")
            .with_base_entity("App\\Entity\\Article")
            .with_priority(5)
            .with_privileges(&["article-edit"]);
        assert_eq!(plugin.label(), "Articles");
        assert_eq!(plugin.base_entity(), Some("App\\Entity\\Article"));
        assert_eq!(plugin.priority(), 5);
        assert_eq!(plugin.privileges(), vec!["article-edit"]);
    }

    #[test]
    fn hooks_are_counted() {
        let plugin = MockPlugin::new("P");
        let mut view = PluginView::new(&plugin, Arc::new(Context::new()));
        plugin.before_render(&mut view).unwrap();
        plugin.before_render(&mut view).unwrap();
        plugin.after_render(&mut view).unwrap();
        assert_eq!(plugin.before_render_calls(), 2);
        assert_eq!(plugin.after_render_calls(), 1);
    }

    #[test]
    fn before_render_fills_the_view() {
        let plugin = MockPlugin::new("P")
            .with_title("Articles")
            .with_breadcrumb("Home", None);
        let mut view = PluginView::new(&plugin, Arc::new(Context::new()));
        plugin.before_render(&mut view).unwrap();
        assert_eq!(view.title(), Some("Articles"));
        assert_eq!(view.breadcrumb()[0].href, "#");
    }

    #[test]
    fn redirect_ends_before_render() {
        let plugin = MockPlugin::new("P").with_redirect("/login");
        let mut view = PluginView::new(&plugin, Arc::new(Context::new()));
        let err = plugin.before_render(&mut view).unwrap_err();
        assert!(matches!(err, TrellisError::Redirect { ref path } if path == "/login"));
    }
}
