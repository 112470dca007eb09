// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with "did you mean?" suggestions.
//!
//! Turns extraction errors into miette diagnostics carrying source spans and
//! the list of valid keys, suggesting the closest valid key via
//! Jaro-Winkler similarity.

#![allow(unused_assignments)] // emitted by the miette derive

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for a suggestion. Catches `implments`
/// for `implements` and `veiw` for `view` without suggesting noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Everything that can go wrong while reading `trellis.toml`.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key `deny_unknown_fields` rejected, usually a typo.
    #[error("`{key}` is not a recognized key")]
    #[diagnostic(
        code(trellis::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The key as written.
        key: String,
        /// Closest valid key, when one is similar enough.
        suggestion: Option<String>,
        /// Comma-separated keys accepted at that position.
        valid_keys: String,
        /// Where the key sits in its file, when it could be located.
        #[label("unrecognized")]
        span: Option<SourceSpan>,
        /// The file the key was read from.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// Value present but of the wrong TOML type.
    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(trellis::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path of the offending key, e.g. `registry.default_position`.
        key: String,
        /// What was found versus what was expected.
        detail: String,
        /// The expected type, repeated in the help text.
        expected: String,
    },

    /// A required field is absent, typically inside a `[[components]]` entry.
    #[error("`{key}` is required")]
    #[diagnostic(
        code(trellis::config::missing_key),
        help("every [[components]] entry needs `key`, `implements`, `view` and `source`")
    )]
    MissingKey { key: String },

    /// Rejected by the checks in [`crate::validation`].
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(trellis::config::validation))]
    Validation { message: String },

    /// Anything figment reports that has no dedicated variant (I/O, syntax).
    #[error("cannot load configuration: {0}")]
    #[diagnostic(code(trellis::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Split a `figment::Error` chain into one diagnostic per failure.
///
/// `toml_sources` pairs file paths with their contents so unknown keys can be
/// pointed at in the source.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid: Vec<&str> = expected.to_vec();
                let (span, src) = locate_key(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, &valid),
                    valid_keys: valid.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

fn locate_key(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline sources have no file origin; fall back to the only source given.
    let source = match origin {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    let Some((path, content)) = source else {
        return (None, None);
    };
    match find_key_offset(content, &error.path, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` in TOML `content`, searched after the header of the
/// first section in `path` (`[registry]` or `[[components]]`).
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        None => 0,
        Some(section) => {
            let array_header = format!("[[{section}]]");
            let table_header = format!("[{section}]");
            content
                .find(&array_header)
                .map(|pos| pos + array_header.len())
                .or_else(|| content.find(&table_header).map(|pos| pos + table_header.len()))?
        }
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(field)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

/// Best valid key above the similarity threshold, if any.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Print diagnostics to stderr, falling back to plain text.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        if handler.render_report(&mut buf, error as &dyn Diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_implements_for_typo() {
        let valid = &["key", "name", "implements", "view", "source"];
        assert_eq!(suggest_key("implments", valid), Some("implements".to_string()));
    }

    #[test]
    fn suggests_view_for_veiw() {
        let valid = &["key", "implements", "view", "source", "position"];
        assert_eq!(suggest_key("veiw", valid), Some("view".to_string()));
    }

    #[test]
    fn no_suggestion_for_distant_key() {
        let valid = &["log_level", "cache_dir"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn finds_key_inside_array_of_tables() {
        let content = "[registry]\nlog_level = \"info\"\n\n[[components]]\nkey = \"a\"\nveiw = \"detail\"\n";
        let path = vec!["components".to_string()];
        let offset = find_key_offset(content, &path, "veiw").unwrap();
        assert_eq!(&content[offset..offset + 4], "veiw");
    }

    #[test]
    fn finds_key_in_plain_table() {
        let content = "[registry]\n  cache_dri = \"/tmp\"\n";
        let path = vec!["registry".to_string()];
        let offset = find_key_offset(content, &path, "cache_dri").unwrap();
        assert_eq!(&content[offset..offset + 9], "cache_dri");
    }

    #[test]
    fn prefix_of_longer_key_is_not_a_match() {
        let content = "[registry]\nlog_level_x = 1\n";
        let path = vec!["registry".to_string()];
        assert_eq!(find_key_offset(content, &path, "log_level"), None);
    }
}
