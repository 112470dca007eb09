// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived metadata snapshot of one discovered plugin.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use trellis_core::{MenuItem, Plugin};

use crate::naming::{derive_plugin_name, kebab_case};

/// Immutable snapshot of a plugin's metadata, cached between restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfoEntity {
    /// Service id within the container.
    pub service: String,
    /// Concrete implementing type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Derived short name (`ArticlePlugin` → `Article`).
    pub name: String,
    /// The plugin's self-declared name.
    pub real_name: String,
    /// Entity the plugin routes for, if any.
    pub base_entity: Option<String>,
    /// Menu and navigation label.
    pub label: String,
    /// Directory with the plugin's templates and assets.
    pub base_path: Option<PathBuf>,
    /// Menu ordering weight.
    pub priority: i32,
    pub icon: Option<String>,
    /// Roles allowed to open the plugin; empty means everyone.
    pub roles: Vec<String>,
    /// Kebab-case privileges the plugin checks.
    pub privileges: Vec<String>,
    pub menu_item: Option<MenuItem>,
}

impl PluginInfoEntity {
    /// Reads metadata from a live plugin. Roles and privileges are taken as
    /// given; validation happens in the registry before this is called.
    pub fn from_plugin(service: &str, plugin: &dyn Plugin) -> Self {
        Self {
            service: service.to_string(),
            type_name: plugin.type_name().to_string(),
            name: derive_plugin_name(plugin.type_name()),
            real_name: plugin.name().to_string(),
            base_entity: plugin.base_entity().map(str::to_string),
            label: plugin.label().to_string(),
            base_path: plugin.base_path(),
            priority: plugin.priority(),
            icon: plugin.icon().map(str::to_string),
            roles: plugin.roles(),
            privileges: plugin.privileges(),
            menu_item: plugin.menu_item(),
        }
    }

    /// URL-friendly form of [`name`](Self::name): `ArticleCategory` → `article-category`.
    pub fn sanitized_name(&self) -> String {
        kebab_case(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CategoryPlugin;

    impl Plugin for CategoryPlugin {
        fn type_name(&self) -> &str {
            "App\\Plugin\\ArticleCategoryPlugin"
        }

        fn name(&self) -> &str {
            "Article categories"
        }

        fn base_entity(&self) -> Option<&str> {
            Some("App\\Entity\\ArticleCategory")
        }

        fn icon(&self) -> Option<&str> {
            Some("folder")
        }

        fn privileges(&self) -> Vec<String> {
            vec!["category-edit".into()]
        }
    }

    #[test]
    fn from_plugin_reads_all_metadata() {
        let info = PluginInfoEntity::from_plugin("trellis.plugin.category", &CategoryPlugin);
        assert_eq!(info.service, "trellis.plugin.category");
        assert_eq!(info.type_name, "App\\Plugin\\ArticleCategoryPlugin");
        assert_eq!(info.name, "ArticleCategory");
        assert_eq!(info.real_name, "Article categories");
        assert_eq!(info.label, "Article categories");
        assert_eq!(info.base_entity.as_deref(), Some("App\\Entity\\ArticleCategory"));
        assert_eq!(info.priority, 1);
        assert_eq!(info.icon.as_deref(), Some("folder"));
        assert_eq!(info.privileges, vec!["category-edit"]);
        assert!(info.menu_item.is_none());
        assert_eq!(info.sanitized_name(), "article-category");
    }

    #[test]
    fn serialized_form_uses_type_key() {
        let info = PluginInfoEntity::from_plugin("svc", &CategoryPlugin);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "App\\Plugin\\ArticleCategoryPlugin");
        assert_eq!(json["realName"], "Article categories");
    }
}
