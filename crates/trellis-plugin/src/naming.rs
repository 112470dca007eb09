// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type-name helpers shared by the registry and the bootstrap wiring.
//!
//! Type names are namespaced with either `\` (`App\Entity\Article`) or `::`
//! (`app::entity::Article`).

/// Splits a type name at its last namespace separator.
fn split_namespace(type_name: &str) -> Option<(&str, &str)> {
    let backslash = type_name.rfind('\\').map(|i| (i, 1));
    let colons = type_name.rfind("::").map(|i| (i, 2));
    let (idx, sep_len) = match (backslash, colons) {
        (Some(a), Some(b)) => a.max(b),
        (a, b) => a.or(b)?,
    };
    Some((&type_name[..idx], &type_name[idx + sep_len..]))
}

/// Final path segment of a type name.
pub fn simple_name(type_name: &str) -> &str {
    split_namespace(type_name).map_or(type_name, |(_, tail)| tail)
}

/// Short name used for routing: only namespaced types have one.
pub fn routing_short_name(type_name: &str) -> Option<&str> {
    split_namespace(type_name)
        .map(|(_, tail)| tail)
        .filter(|tail| !tail.is_empty())
}

/// Display name of a plugin type: simple name without a trailing `Plugin`,
/// first letter upper-cased (`App\Plugin\articlePlugin` → `Article`).
pub fn derive_plugin_name(type_name: &str) -> String {
    let simple = simple_name(type_name);
    let stem = simple
        .strip_suffix("Plugin")
        .filter(|stem| !stem.is_empty())
        .unwrap_or(simple);
    upper_first(stem)
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `ArticleCategory` → `article-category`.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_uppercase()
            && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
        {
            out.push('-');
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }
    out
}
