// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Privilege validation applied when plugins are registered.
//!
//! Roles need no check beyond being strings, which `Plugin::roles` guarantees.

use std::sync::LazyLock;

use regex::Regex;
use trellis_core::TrellisError;

/// `fooBar`: a single camelCase word boundary, suggestable as `foo-bar`.
static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)([A-Z])([a-z]*)$").expect("valid regex"));

/// Privileges must be non-empty, lower-case and dash-separated.
pub fn validate_privileges(privileges: &[String]) -> Result<(), TrellisError> {
    privileges.iter().try_for_each(|p| validate_privilege(p))
}

pub fn validate_privilege(privilege: &str) -> Result<(), TrellisError> {
    let invalid = |reason: String| TrellisError::InvalidPrivilege {
        privilege: privilege.to_string(),
        reason,
    };

    if privilege.is_empty() {
        return Err(invalid("privilege can not be empty string".to_string()));
    }
    if let Some(caps) = CAMEL_CASE.captures(privilege) {
        return Err(invalid(format!(
            "can not use camelCase, did you mean \"{}-{}{}\"?",
            &caps[1],
            caps[2].to_lowercase(),
            &caps[3]
        )));
    }
    let lower = privilege.to_lowercase();
    if lower != privilege {
        return Err(invalid(format!(
            "must use lower characters only, did you mean \"{lower}\"?"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_separated_privilege_is_accepted() {
        assert!(validate_privilege("foo-bar").is_ok());
        assert!(validate_privilege("article").is_ok());
    }

    #[test]
    fn camel_case_privilege_suggests_dashes() {
        let err = validate_privilege("fooBar").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("camelCase"), "{msg}");
        assert!(msg.contains("\"foo-bar\""), "{msg}");
    }

    #[test]
    fn empty_privilege_is_rejected() {
        assert!(matches!(
            validate_privilege(""),
            Err(TrellisError::InvalidPrivilege { .. })
        ));
    }

    #[test]
    fn upper_case_privilege_suggests_lower_case() {
        let err = validate_privilege("ArticleEdit").unwrap_err();
        assert!(err.to_string().contains("\"articleedit\""));
    }

    #[test]
    fn first_invalid_privilege_fails_the_list() {
        let privileges = vec!["read".to_string(), "fooBar".to_string()];
        assert!(validate_privileges(&privileges).is_err());
        assert!(validate_privileges(&[]).is_ok());
    }
}
