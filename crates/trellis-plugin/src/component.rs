// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in template component.
//!
//! Renders a descriptor as a custom element whose attributes are the
//! component parameters, e.g. `<article-content :id="42" locale="en">`.
//! Values taken from the request query win over declared defaults.

use std::path::{Path, PathBuf};

use trellis_core::{ParamValue, PluginComponent, RenderContext, Scalar, TrellisError};

use crate::descriptor::ComponentDescriptor;
use crate::params::ComponentParams;

/// Component type name of [`TemplateComponent`], the default implementation.
pub const TEMPLATE_COMPONENT_TYPE: &str = "trellis::TemplateComponent";

/// Resolved value of one attribute before escaping.
enum AttrValue<'a> {
    Null,
    Scalar(&'a Scalar),
    Query(&'a str),
}

impl AttrValue<'_> {
    /// Expression-bound values get a `:` prefix so the front end does not
    /// receive them as strings.
    fn is_expression(&self) -> bool {
        match self {
            AttrValue::Null => true,
            AttrValue::Scalar(Scalar::String(s)) => is_numeric(s),
            AttrValue::Scalar(_) => true,
            AttrValue::Query(s) => is_numeric(s),
        }
    }

    fn text(&self) -> String {
        match self {
            AttrValue::Null => "null".to_string(),
            AttrValue::Scalar(scalar) => scalar.to_string(),
            AttrValue::Query(s) => (*s).to_string(),
        }
    }
}

/// Default component rendering a descriptor as a front-end custom element.
#[derive(Debug, Clone)]
pub struct TemplateComponent {
    key: String,
    name: String,
    tab: String,
    source: PathBuf,
    position: i32,
    params: ComponentParams,
}

impl TemplateComponent {
    pub fn from_descriptor(descriptor: &ComponentDescriptor) -> Self {
        Self {
            key: descriptor.key.clone(),
            name: descriptor.name.clone(),
            tab: descriptor.tab.clone(),
            source: descriptor.source.clone(),
            position: descriptor.position,
            params: descriptor.params.clone(),
        }
    }

    pub fn params(&self) -> &ComponentParams {
        &self.params
    }
}

impl PluginComponent for TemplateComponent {
    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tab(&self) -> &str {
        &self.tab
    }

    fn source(&self) -> &Path {
        &self.source
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, TrellisError> {
        let element = escape_attr(&self.name);
        let mut attrs = Vec::with_capacity(self.params.len());

        for (param, default) in self.params.iter() {
            let value = match (ctx.query.get(param), default) {
                (Some(query), _) => AttrValue::Query(query.as_str()),
                (None, ParamValue::Required) => {
                    return Err(TrellisError::Render {
                        component: self.key.clone(),
                        message: format!("parameter \"{param}\" is required"),
                    });
                }
                (None, ParamValue::Null) => AttrValue::Null,
                (None, ParamValue::Value(scalar)) => AttrValue::Scalar(scalar),
            };
            let prefix = if value.is_expression() { ":" } else { "" };
            attrs.push(format!(
                "{prefix}{}=\"{}\"",
                escape_attr(param),
                escape_attr(&value.text())
            ));
        }

        let attrs = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.join(" "))
        };
        Ok(format!("<{element}{attrs}></{element}>"))
    }
}

/// Decimal or exponent notation, optionally signed and surrounded by spaces.
fn is_numeric(s: &str) -> bool {
    let s = s.trim();
    s.bytes().any(|b| b.is_ascii_digit())
        && s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && s.parse::<f64>().is_ok()
}

/// Escapes a string for use inside a double-quoted HTML attribute.
fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    // innerHTML mXSS: a backtick-only value must not stay unquoted-looking.
    if s.contains('`') && !s.contains([' ', '<', '>', '"', '\'']) {
        out.push(' ');
    }
    out
}
