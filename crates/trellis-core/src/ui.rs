// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simple UI value objects plugins hand to the front end: buttons,
//! breadcrumbs and context-menu entries.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
}

/// What activating a button or menu entry does with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum MenuAction {
    Divider,
    Link,
    /// Link opened in a named window target.
    LinkTarget,
    LinkTab,
    Modal,
    Method,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub variant: ButtonVariant,
    pub label: String,
    pub icon: Option<String>,
    pub action: MenuAction,
    pub target: String,
}

impl Button {
    pub fn new(
        variant: ButtonVariant,
        label: impl Into<String>,
        action: MenuAction,
        target: impl Into<String>,
    ) -> Self {
        Self {
            variant,
            label: label.into(),
            icon: None,
            action,
            target: target.into(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
}

impl Breadcrumb {
    /// Breadcrumb linking to `href`, or to `#` when there is nowhere to go.
    pub fn new(label: impl Into<String>, href: Option<&str>) -> Self {
        Self {
            label: label.into(),
            href: href.unwrap_or("#").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMenu {
    pub name: String,
    pub action: MenuAction,
    pub target: Option<String>,
    pub active: bool,
    pub disabled: bool,
}

impl ContextMenu {
    pub fn new(name: impl Into<String>, action: MenuAction, target: Option<&str>) -> Self {
        Self {
            name: name.into(),
            action,
            target: target.map(str::to_string),
            active: false,
            disabled: false,
        }
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn button_serializes_for_the_front_end() {
        let button = Button::new(
            ButtonVariant::Primary,
            "Edit",
            MenuAction::LinkTab,
            "/article/edit",
        )
        .with_icon("pencil");
        assert_eq!(
            serde_json::to_value(&button).unwrap(),
            json!({
                "variant": "primary",
                "label": "Edit",
                "icon": "pencil",
                "action": "linkTab",
                "target": "/article/edit",
            })
        );
    }

    #[test]
    fn action_names_are_camel_case() {
        assert_eq!(MenuAction::LinkTarget.to_string(), "linkTarget");
        assert_eq!(MenuAction::from_str("modal").unwrap(), MenuAction::Modal);
        assert_eq!(ButtonVariant::Danger.to_string(), "danger");
    }

    #[test]
    fn breadcrumb_href_defaults_to_hash() {
        assert_eq!(Breadcrumb::new("Home", None).href, "#");
        assert_eq!(Breadcrumb::new("Articles", Some("/articles")).href, "/articles");
    }

    #[test]
    fn context_menu_flags() {
        let entry = ContextMenu::new("Delete", MenuAction::Method, Some("delete")).disabled();
        assert!(entry.disabled);
        assert!(!entry.active);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"], "method");
        assert_eq!(json["target"], "delete");
    }
}
