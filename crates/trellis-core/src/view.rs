// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request view state of a plugin and the shared link context.
//!
//! Plugins are long-lived shared services, so everything a plugin decides
//! while handling one request (title, toolbar buttons, breadcrumbs, the link
//! back) lives in a [`PluginView`] the host creates for that request and
//! hands to the render hooks.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::error::TrellisError;
use crate::traits::link::LinkGenerator;
use crate::traits::plugin::Plugin;
use crate::types::Scalar;
use crate::ui::{Breadcrumb, Button, ContextMenu};

/// Route linked to when a caller does not name one.
pub const DEFAULT_ROUTE: &str = "Homepage:default";

/// Services shared by every view, assigned once at startup.
#[derive(Default)]
pub struct Context {
    link_generator: OnceLock<Arc<dyn LinkGenerator>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link_generator(&self) -> Option<&Arc<dyn LinkGenerator>> {
        self.link_generator.get()
    }

    /// Install the link generator.
    ///
    /// Setting the same instance again is a no-op; a different one is
    /// rejected once a generator is in place.
    pub fn set_link_generator(
        &self,
        generator: Arc<dyn LinkGenerator>,
    ) -> Result<(), TrellisError> {
        let current = self.link_generator.get_or_init(|| Arc::clone(&generator));
        if Arc::ptr_eq(current, &generator) {
            Ok(())
        } else {
            Err(TrellisError::Config(
                "link generator has already been defined".to_string(),
            ))
        }
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("link_generator", &self.link_generator.get().is_some())
            .finish()
    }
}

/// Front-end component replacing the default view body, with its props.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartControl {
    pub component: String,
    pub params: BTreeMap<String, serde_json::Value>,
}

/// What one plugin view shows around its components.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginView {
    #[serde(skip)]
    plugin_name: String,
    #[serde(skip)]
    context: Arc<Context>,
    title: Option<String>,
    subtitle: Option<String>,
    link_back: Option<String>,
    save_all: bool,
    buttons: Vec<Button>,
    breadcrumb: Vec<Breadcrumb>,
    context_menu: Vec<ContextMenu>,
    smart_control: Option<SmartControl>,
}

impl PluginView {
    /// Empty view state for one request handled by `plugin`.
    pub fn new(plugin: &dyn Plugin, context: Arc<Context>) -> Self {
        Self {
            plugin_name: plugin.name().to_string(),
            context,
            title: None,
            subtitle: None,
            link_back: None,
            save_all: false,
            buttons: Vec::new(),
            breadcrumb: Vec::new(),
            context_menu: Vec::new(),
            smart_control: None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = Some(subtitle.into());
    }

    pub fn link_back(&self) -> Option<&str> {
        self.link_back.as_deref()
    }

    /// An empty link clears the back link.
    pub fn set_link_back(&mut self, link: &str) {
        self.link_back = (!link.is_empty()).then(|| link.to_string());
    }

    pub fn is_save_all(&self) -> bool {
        self.save_all
    }

    /// Show a single "save all" action instead of per-component saves.
    pub fn set_save_all(&mut self, save_all: bool) {
        self.save_all = save_all;
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn add_button(&mut self, button: Button) {
        self.buttons.push(button);
    }

    pub fn breadcrumb(&self) -> &[Breadcrumb] {
        &self.breadcrumb
    }

    pub fn add_breadcrumb(&mut self, breadcrumb: Breadcrumb) {
        self.breadcrumb.push(breadcrumb);
    }

    pub fn context_menu(&self) -> &[ContextMenu] {
        &self.context_menu
    }

    pub fn add_context_menu(&mut self, entry: ContextMenu) {
        self.context_menu.push(entry);
    }

    pub fn smart_control(&self) -> Option<&SmartControl> {
        self.smart_control.as_ref()
    }

    pub fn set_smart_control(
        &mut self,
        component: impl Into<String>,
        params: BTreeMap<String, serde_json::Value>,
    ) {
        self.smart_control = Some(SmartControl {
            component: component.into(),
            params,
        });
    }

    /// Internal link to `route` (`Plugin:view`) through the host's generator.
    pub fn link(
        &self,
        route: &str,
        params: &BTreeMap<String, Scalar>,
    ) -> Result<String, TrellisError> {
        let generator =
            self.context
                .link_generator()
                .ok_or_else(|| TrellisError::MissingService {
                    type_name: "trellis_core::LinkGenerator".to_string(),
                })?;
        Ok(generator.link(route, params))
    }

    /// Link to [`DEFAULT_ROUTE`] without parameters.
    pub fn home_link(&self) -> Result<String, TrellisError> {
        self.link(DEFAULT_ROUTE, &BTreeMap::new())
    }

    /// Abandon the request and send the client to `path`.
    ///
    /// Meant to be returned from a render hook: `return view.redirect("/")`.
    pub fn redirect<T>(&self, path: &str) -> Result<T, TrellisError> {
        Err(TrellisError::Redirect {
            path: path.to_string(),
        })
    }

    /// Abandon the request with a message for the user. Without a message,
    /// a generic one naming the plugin is used.
    pub fn error<T>(&self, message: Option<&str>) -> Result<T, TrellisError> {
        Err(TrellisError::UserError {
            message: message
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}: Plugin error", self.plugin_name)),
        })
    }

    /// Stop handling the request; the response is already complete.
    pub fn terminate<T>(&self) -> Result<T, TrellisError> {
        Err(TrellisError::Terminated)
    }
}
