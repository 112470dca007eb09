// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry: component resolution and plugin metadata.
//!
//! The `PluginRegistry` holds the registered component descriptors and a
//! snapshot of derived plugin metadata. Descriptors are added during
//! bootstrap; afterwards the registry is shared and only the snapshot changes,
//! swapped atomically when the plugin-service list is refreshed.
//!
//! [`PluginRegistry::render_view`] drives one request: the plugin's hooks
//! fill a fresh [`PluginView`], and the matching components render in order.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};
use trellis_core::{
    CacheStorage, Context, Plugin, PluginComponent, PluginView, RenderContext, TrellisError,
};

use crate::catalog::EntityCatalog;
use crate::container::ServiceContainer;
use crate::descriptor::ComponentDescriptor;
use crate::factory::ComponentFactories;
use crate::info::PluginInfoEntity;
use crate::naming::derive_plugin_name;
use crate::page::{RenderedComponent, RenderedPage};
use crate::snapshot::{PluginSnapshot, services_fingerprint};

/// Cache key of the serialized [`PluginSnapshot`].
pub const PLUGIN_INFO_CACHE_KEY: &str = "plugin-info";

/// The ways a caller may identify a plugin.
#[derive(Debug, Clone)]
pub enum PluginRef<'a> {
    Instance(Arc<dyn Plugin>),
    Type(&'a str),
    Info(&'a PluginInfoEntity),
}

impl From<Arc<dyn Plugin>> for PluginRef<'_> {
    fn from(plugin: Arc<dyn Plugin>) -> Self {
        PluginRef::Instance(plugin)
    }
}

impl From<&Arc<dyn Plugin>> for PluginRef<'_> {
    fn from(plugin: &Arc<dyn Plugin>) -> Self {
        PluginRef::Instance(Arc::clone(plugin))
    }
}

impl<'a> From<&'a str> for PluginRef<'a> {
    fn from(type_name: &'a str) -> Self {
        PluginRef::Type(type_name)
    }
}

impl<'a> From<&'a PluginInfoEntity> for PluginRef<'a> {
    fn from(info: &'a PluginInfoEntity) -> Self {
        PluginRef::Info(info)
    }
}

/// Registry of components and discovered plugins.
pub struct PluginRegistry {
    container: Arc<ServiceContainer>,
    catalog: EntityCatalog,
    factories: ComponentFactories,
    cache: Arc<dyn CacheStorage>,
    components: Vec<ComponentDescriptor>,
    snapshot: ArcSwap<PluginSnapshot>,
    context: Arc<Context>,
}

impl PluginRegistry {
    /// Create a registry with no components and an empty plugin snapshot.
    pub fn new(
        container: Arc<ServiceContainer>,
        catalog: EntityCatalog,
        factories: ComponentFactories,
        cache: Arc<dyn CacheStorage>,
    ) -> Self {
        Self {
            container,
            catalog,
            factories,
            cache,
            components: Vec::new(),
            snapshot: ArcSwap::from_pointee(PluginSnapshot::default()),
            context: Arc::new(Context::new()),
        }
    }

    /// Services shared by every [`PluginView`] this registry opens.
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    pub fn container(&self) -> &Arc<ServiceContainer> {
        &self.container
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    pub fn factories(&self) -> &ComponentFactories {
        &self.factories
    }

    /// Append descriptors after the existing ones.
    ///
    /// Duplicate keys are accepted but logged: they make matches ambiguous.
    pub fn add_components(&mut self, components: impl IntoIterator<Item = ComponentDescriptor>) {
        for component in components {
            if self.components.iter().any(|c| c.key == component.key) {
                warn!(key = %component.key, "duplicate component key registered");
            }
            self.components.push(component);
        }
    }

    /// Replace all descriptors.
    pub fn set_components(&mut self, components: Vec<ComponentDescriptor>) {
        self.components.clear();
        self.add_components(components);
    }

    pub fn components_info(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    /// Rebuild plugin metadata for `services`, unless the cached snapshot
    /// was built from the same list.
    pub fn refresh_plugin_services(&self, services: &[String]) -> Result<(), TrellisError> {
        let hash = services_fingerprint(services);

        if let Some(cached) = self.load_cached(&hash)? {
            debug!(hash = %hash, plugins = cached.plugins.len(), "plugin info served from cache");
            self.snapshot.store(Arc::new(cached));
            return Ok(());
        }

        let snapshot = PluginSnapshot::build(hash, services, &self.container)?;
        self.cache
            .save(PLUGIN_INFO_CACHE_KEY, serde_json::to_value(&snapshot)?)?;
        info!(
            hash = %snapshot.hash,
            plugins = snapshot.plugins.len(),
            "plugin info rebuilt"
        );
        self.snapshot.store(Arc::new(snapshot));
        Ok(())
    }

    fn load_cached(&self, hash: &str) -> Result<Option<PluginSnapshot>, TrellisError> {
        let Some(value) = self.cache.load(PLUGIN_INFO_CACHE_KEY)? else {
            debug!("plugin info cache miss");
            return Ok(None);
        };
        match serde_json::from_value::<PluginSnapshot>(value) {
            Ok(snapshot) if snapshot.hash == hash => Ok(Some(snapshot)),
            Ok(_) => {
                debug!("plugin info cache is stale");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "cached plugin info is unreadable, rebuilding");
                Ok(None)
            }
        }
    }

    /// Current plugin metadata snapshot.
    pub fn snapshot(&self) -> Arc<PluginSnapshot> {
        self.snapshot.load_full()
    }

    pub fn plugin_info(&self) -> Vec<PluginInfoEntity> {
        self.snapshot.load().plugins.clone()
    }

    pub fn plugin_info_by_type(&self, plugin_type: &str) -> Option<PluginInfoEntity> {
        self.snapshot.load().plugin(plugin_type).cloned()
    }

    pub fn base_entity_to_plugin(&self) -> BTreeMap<String, String> {
        self.snapshot.load().base_entity_to_plugin.clone()
    }

    pub fn base_entity_simple_to_plugin(&self) -> BTreeMap<String, String> {
        self.snapshot.load().base_entity_simple_to_plugin.clone()
    }

    /// Plugin type handling `entity`, by full type name or routing short name.
    pub fn plugin_for_entity(&self, entity: &str) -> Option<String> {
        let snapshot = self.snapshot.load();
        snapshot
            .base_entity_to_plugin
            .get(entity)
            .or_else(|| snapshot.base_entity_simple_to_plugin.get(entity))
            .cloned()
    }

    /// Plugin by its derived name (`Article` for `App\Plugin\ArticlePlugin`).
    pub fn plugin_by_name(&self, name: &str) -> Result<Arc<dyn Plugin>, TrellisError> {
        let plugin_type = self
            .snapshot
            .load()
            .name_to_type
            .get(name)
            .cloned()
            .ok_or_else(|| TrellisError::PluginNotFound {
                name: name.to_string(),
            })?;
        self.plugin_by_type(&plugin_type)
    }

    pub fn plugin_by_type(&self, plugin_type: &str) -> Result<Arc<dyn Plugin>, TrellisError> {
        self.container.plugin_by_type(plugin_type)
    }

    /// Derived name of `plugin`, from the snapshot when it is known there.
    pub fn plugin_display_name(&self, plugin: &dyn Plugin) -> String {
        let plugin_type = plugin.type_name();
        self.snapshot
            .load()
            .name_to_type
            .iter()
            .find(|(_, t)| t.as_str() == plugin_type)
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| derive_plugin_name(plugin_type))
    }

    /// Every type name `plugin` counts as for component matching: its own
    /// type, its base entity and the interfaces of that entity.
    pub fn capability_set(&self, plugin: &dyn Plugin) -> Result<HashSet<String>, TrellisError> {
        let mut capabilities = HashSet::from([plugin.type_name().to_string()]);

        if let Some(entity) = plugin.base_entity() {
            let interfaces = self.catalog.interfaces_of(entity).ok_or_else(|| {
                TrellisError::BrokenEntityReference {
                    entity: entity.to_string(),
                    plugin: plugin.type_name().to_string(),
                }
            })?;
            capabilities.insert(entity.to_string());
            capabilities.extend(interfaces.iter().cloned());
        }

        Ok(capabilities)
    }

    /// Components applying to `plugin` in `view` (every view when `None`),
    /// highest position first. Equal positions keep registration order.
    pub fn resolve_components<'a>(
        &self,
        plugin: impl Into<PluginRef<'a>>,
        view: Option<&str>,
    ) -> Result<Vec<Box<dyn PluginComponent>>, TrellisError> {
        let plugin = self.instance(plugin.into())?;
        let capabilities = self.capability_set(plugin.as_ref())?;

        let mut components = self
            .components
            .iter()
            .filter(|d| capabilities.contains(&d.implements) && d.matches_view(view))
            .map(|d| self.factories.create(d, &self.container))
            .collect::<Result<Vec<_>, _>>()?;

        components.sort_by(|a, b| b.position().cmp(&a.position()));

        debug!(
            plugin = plugin.type_name(),
            view = view.unwrap_or("*"),
            matched = components.len(),
            "resolved components"
        );
        Ok(components)
    }

    /// Fresh view state for one request handled by `plugin`.
    pub fn open_view(&self, plugin: &dyn Plugin) -> PluginView {
        PluginView::new(plugin, Arc::clone(&self.context))
    }

    /// Render `view` of `plugin` for one request.
    ///
    /// Runs `before_render`, renders every matching component against
    /// `query`, then runs `after_render`. A redirect, user error or
    /// termination raised by a hook ends the request with that error and
    /// nothing further runs.
    pub fn render_view<'a>(
        &self,
        plugin: impl Into<PluginRef<'a>>,
        view: &str,
        query: &BTreeMap<String, String>,
    ) -> Result<RenderedPage, TrellisError> {
        let plugin = self.instance(plugin.into())?;
        let mut state = self.open_view(plugin.as_ref());

        if let Err(e) = plugin.before_render(&mut state) {
            if e.is_control_flow() {
                debug!(plugin = plugin.type_name(), signal = %e, "request ended by plugin");
            }
            return Err(e);
        }

        let ctx = RenderContext::new(query).with_plugin(plugin.as_ref());
        let components = self
            .resolve_components(&plugin, Some(view))?
            .iter()
            .map(|component| -> Result<RenderedComponent, TrellisError> {
                Ok(RenderedComponent {
                    key: component.key().to_string(),
                    tab: component.tab().to_string(),
                    html: component.render(&ctx)?,
                })
            })
            .collect::<Result<Vec<_>, TrellisError>>()?;

        plugin.after_render(&mut state)?;

        Ok(RenderedPage {
            plugin: plugin.type_name().to_string(),
            view: view.to_string(),
            state,
            components,
        })
    }

    fn instance(&self, plugin: PluginRef<'_>) -> Result<Arc<dyn Plugin>, TrellisError> {
        match plugin {
            PluginRef::Instance(plugin) => Ok(plugin),
            PluginRef::Type(plugin_type) => self.plugin_by_type(plugin_type),
            PluginRef::Info(info) => self.plugin_by_type(&info.type_name),
        }
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("components", &self.components.len())
            .field("plugins", &self.snapshot.load().plugins.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;
    use trellis_test_utils::{CountingStorage, MockPlugin};

    use super::*;
    use crate::cache::{FileStorage, MemoryStorage};

    const ARTICLE_PLUGIN: &str = "App\\Plugin\\ArticlePlugin";
    const ARTICLE: &str = "App\\Entity\\Article";

    fn registry_with(
        plugins: Vec<MockPlugin>,
        cache: Arc<dyn CacheStorage>,
    ) -> (PluginRegistry, Vec<String>) {
        let mut container = ServiceContainer::new();
        let services = plugins
            .into_iter()
            .map(|p| container.add_plugin(Arc::new(p)).unwrap())
            .collect();
        let mut catalog = EntityCatalog::new();
        catalog.register(ARTICLE, ["App\\Contract\\Publishable"]);
        let registry = PluginRegistry::new(
            Arc::new(container),
            catalog,
            ComponentFactories::new(),
            cache,
        );
        (registry, services)
    }

    fn article_registry() -> PluginRegistry {
        let (registry, services) = registry_with(
            vec![MockPlugin::new(ARTICLE_PLUGIN).with_base_entity(ARTICLE)],
            Arc::new(MemoryStorage::new()),
        );
        registry.refresh_plugin_services(&services).unwrap();
        registry
    }

    fn keys(components: &[Box<dyn PluginComponent>]) -> Vec<&str> {
        components.iter().map(|c| c.key()).collect()
    }

    #[test]
    fn equal_positions_keep_registration_order() {
        let mut registry = article_registry();
        registry.add_components([
            ComponentDescriptor::new("a", ARTICLE_PLUGIN, "detail", "a.js").with_position(10),
            ComponentDescriptor::new("b", ARTICLE_PLUGIN, "detail", "b.js").with_position(10),
            ComponentDescriptor::new("c", ARTICLE_PLUGIN, "list", "c.js").with_position(20),
        ]);

        let detail = registry.resolve_components(ARTICLE_PLUGIN, Some("detail")).unwrap();
        assert_eq!(keys(&detail), vec!["a", "b"]);

        let all = registry.resolve_components(ARTICLE_PLUGIN, None).unwrap();
        assert_eq!(keys(&all), vec!["c", "a", "b"]);
    }

    #[test]
    fn base_entity_and_interfaces_widen_matching() {
        let mut registry = article_registry();
        registry.add_components([
            ComponentDescriptor::new("entity", ARTICLE, "detail", "e.js"),
            ComponentDescriptor::new("iface", "App\\Contract\\Publishable", "detail", "i.js"),
            ComponentDescriptor::new("other", "App\\Entity\\Product", "detail", "o.js"),
        ]);

        let found = registry.resolve_components(ARTICLE_PLUGIN, Some("detail")).unwrap();
        assert_eq!(keys(&found), vec!["entity", "iface"]);
    }

    #[test]
    fn plugin_ref_forms_are_equivalent() {
        let mut registry = article_registry();
        registry.add_components([ComponentDescriptor::new("a", ARTICLE_PLUGIN, "detail", "a.js")]);

        let instance = registry.plugin_by_type(ARTICLE_PLUGIN).unwrap();
        let info = registry.plugin_info_by_type(ARTICLE_PLUGIN).unwrap();

        assert_eq!(registry.resolve_components(&instance, None).unwrap().len(), 1);
        assert_eq!(registry.resolve_components(&info, None).unwrap().len(), 1);
        assert_eq!(registry.resolve_components(ARTICLE_PLUGIN, None).unwrap().len(), 1);
    }

    #[test]
    fn undeclared_base_entity_is_a_broken_reference() {
        let (registry, services) = registry_with(
            vec![
                MockPlugin::new("App\\Plugin\\ProductPlugin")
                    .with_base_entity("App\\Entity\\Product"),
            ],
            Arc::new(MemoryStorage::new()),
        );
        registry.refresh_plugin_services(&services).unwrap();

        let err = registry
            .resolve_components("App\\Plugin\\ProductPlugin", None)
            .unwrap_err();
        assert!(matches!(err, TrellisError::BrokenEntityReference { .. }));
    }

    #[test]
    fn lookups_by_name() {
        let registry = article_registry();
        let plugin = registry.plugin_by_name("Article").unwrap();
        assert_eq!(plugin.type_name(), ARTICLE_PLUGIN);
        assert_eq!(registry.plugin_display_name(plugin.as_ref()), "Article");

        let err = registry.plugin_by_name("Missing").unwrap_err();
        assert_eq!(err.status_code(), 404);

        let stranger = MockPlugin::new("Ext\\Plugin\\GalleryPlugin");
        assert_eq!(registry.plugin_display_name(&stranger), "Gallery");
    }

    #[test]
    fn entity_lookups() {
        let registry = article_registry();
        assert_eq!(registry.plugin_for_entity(ARTICLE).as_deref(), Some(ARTICLE_PLUGIN));
        assert_eq!(registry.plugin_for_entity("Article").as_deref(), Some(ARTICLE_PLUGIN));
        assert!(registry.plugin_for_entity("Product").is_none());
        assert_eq!(registry.base_entity_simple_to_plugin().len(), 1);
        assert_eq!(registry.base_entity_to_plugin().len(), 1);
    }

    #[test]
    fn second_refresh_is_served_from_cache() {
        let storage = Arc::new(CountingStorage::new());
        let (registry, services) = registry_with(
            vec![MockPlugin::new(ARTICLE_PLUGIN).with_base_entity(ARTICLE)],
            storage.clone(),
        );

        registry.refresh_plugin_services(&services).unwrap();
        let first = registry.snapshot();
        registry.refresh_plugin_services(&services).unwrap();

        assert_eq!(storage.saves(), 1);
        assert_eq!(storage.loads(), 2);
        assert_eq!(*registry.snapshot(), *first);
    }

    #[test]
    fn unreadable_cache_is_rebuilt() {
        let storage = Arc::new(CountingStorage::seeded(
            PLUGIN_INFO_CACHE_KEY,
            serde_json::json!({"hash": 42}),
        ));
        let (registry, services) =
            registry_with(vec![MockPlugin::new(ARTICLE_PLUGIN)], storage.clone());

        registry.refresh_plugin_services(&services).unwrap();
        assert_eq!(storage.saves(), 1);
        assert_eq!(registry.plugin_info().len(), 1);
    }

    #[test]
    fn truncated_cache_file_is_rebuilt_and_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileStorage::new(tmp.path(), "ns"));
        std::fs::create_dir_all(storage.dir()).unwrap();
        let entry = storage.dir().join("plugin-info.json");
        std::fs::write(&entry, r#"{"hash": "trunc"#).unwrap();

        let (registry, services) = registry_with(
            vec![MockPlugin::new(ARTICLE_PLUGIN).with_base_entity(ARTICLE)],
            storage.clone(),
        );
        registry.refresh_plugin_services(&services).unwrap();

        assert_eq!(registry.plugin_info().len(), 1);
        let persisted = storage.load(PLUGIN_INFO_CACHE_KEY).unwrap().unwrap();
        assert_eq!(persisted["hash"], registry.snapshot().hash.as_str());
    }

    #[test]
    fn rendered_component_uses_descriptor_params() {
        let mut registry = article_registry();
        registry.add_components([
            ComponentDescriptor::new("articleContent", ARTICLE_PLUGIN, "detail", "a.js")
                .with_name("article-content"),
        ]);

        let components = registry.resolve_components(ARTICLE_PLUGIN, Some("detail")).unwrap();
        let query = BTreeMap::new();
        let html = components[0].render(&RenderContext::new(&query)).unwrap();
        assert_eq!(html, "<article-content></article-content>");
    }

    #[test]
    fn render_view_collects_state_and_markup() {
        let (mut registry, services) = registry_with(
            vec![
                MockPlugin::new(ARTICLE_PLUGIN)
                    .with_base_entity(ARTICLE)
                    .with_title("Articles")
                    .with_breadcrumb("Home", None),
            ],
            Arc::new(MemoryStorage::new()),
        );
        registry.refresh_plugin_services(&services).unwrap();
        registry.add_components([
            ComponentDescriptor::new("seo", "App\\Contract\\Publishable", "detail", "s.js")
                .with_name("article-seo")
                .with_tab("SEO"),
            ComponentDescriptor::new("content", ARTICLE_PLUGIN, "detail", "c.js")
                .with_name("article-content")
                .with_position(100),
            ComponentDescriptor::new("list", ARTICLE_PLUGIN, "default", "l.js"),
        ]);

        let page = registry
            .render_view(ARTICLE_PLUGIN, "detail", &BTreeMap::new())
            .unwrap();

        assert_eq!(page.plugin, ARTICLE_PLUGIN);
        assert_eq!(page.state.title(), Some("Articles"));
        assert_eq!(page.state.breadcrumb().len(), 1);
        let keys: Vec<&str> = page.components.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["content", "seo"]);
        assert_eq!(page.components[0].html, "<article-content></article-content>");
        assert_eq!(page.tabs(), vec!["content", "SEO"]);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["state"]["title"], "Articles");
        assert_eq!(json["components"][1]["tab"], "SEO");
    }

    #[test]
    fn redirect_from_a_hook_ends_the_request() {
        let (mut registry, services) = registry_with(
            vec![MockPlugin::new(ARTICLE_PLUGIN).with_redirect("/login")],
            Arc::new(MemoryStorage::new()),
        );
        registry.refresh_plugin_services(&services).unwrap();
        registry.add_components([ComponentDescriptor::new("a", ARTICLE_PLUGIN, "detail", "a.js")]);

        let err = registry
            .render_view(ARTICLE_PLUGIN, "detail", &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, TrellisError::Redirect { ref path } if path == "/login"));
        assert_eq!(err.status_code(), 301);
    }

    #[test]
    fn views_share_the_registry_context() {
        let registry = article_registry();
        let plugin = registry.plugin_by_type(ARTICLE_PLUGIN).unwrap();
        let view = registry.open_view(plugin.as_ref());
        assert!(matches!(
            view.home_link().unwrap_err(),
            TrellisError::MissingService { .. }
        ));
        assert!(registry.context().link_generator().is_none());
    }

    #[test]
    fn set_components_replaces_the_list() {
        let mut registry = article_registry();
        registry.add_components([ComponentDescriptor::new("a", ARTICLE_PLUGIN, "detail", "a.js")]);
        registry.set_components(vec![ComponentDescriptor::new(
            "b",
            ARTICLE_PLUGIN,
            "detail",
            "b.js",
        )]);
        let keys: Vec<&str> = registry.components_info().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["b"]);
    }

    #[test]
    #[traced_test]
    fn duplicate_keys_are_logged_not_rejected() {
        let mut registry = article_registry();
        registry.add_components([
            ComponentDescriptor::new("a", ARTICLE_PLUGIN, "detail", "a.js"),
            ComponentDescriptor::new("a", ARTICLE_PLUGIN, "list", "a.js"),
        ]);
        assert_eq!(registry.components_info().len(), 2);
        assert!(logs_contain("duplicate component key registered"));
    }

    #[test]
    #[traced_test]
    fn cache_hits_are_logged() {
        let (registry, services) = registry_with(
            vec![MockPlugin::new(ARTICLE_PLUGIN)],
            Arc::new(MemoryStorage::new()),
        );
        registry.refresh_plugin_services(&services).unwrap();
        assert!(logs_contain("plugin info rebuilt"));
        registry.refresh_plugin_services(&services).unwrap();
        assert!(logs_contain("plugin info served from cache"));
    }

    #[test]
    #[traced_test]
    fn ambiguous_routing_is_logged_and_returned() {
        let (registry, services) = registry_with(
            vec![
                MockPlugin::new("Blog\\ArticlePlugin").with_base_entity("Blog\\Entity\\Article"),
                MockPlugin::new("News\\ArticlePlugin").with_base_entity("News\\Entity\\Article"),
            ],
            Arc::new(MemoryStorage::new()),
        );
        let err = registry.refresh_plugin_services(&services).unwrap_err();
        assert!(matches!(err, TrellisError::AmbiguousRouting { .. }));
        assert!(logs_contain("ambiguous plugin routing"));
        assert!(registry.plugin_info().is_empty());
    }
}
