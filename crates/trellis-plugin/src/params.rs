// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component parameter contracts.
//!
//! A component declares its parameters as a list mixing two shorthand forms:
//!
//! - `"id"`: required, the caller must supply it;
//! - `"?locale"`: optional, no default;
//! - `{ limit = 10 }`: optional with a default. A `?` name may only map to
//!   null; with any other default the declaration conflicts.
//!
//! [`normalize_params`] turns such a list into a [`ComponentParams`]
//! contract keyed by name, with names normalized to a lower-case first letter.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use trellis_core::{ParamValue, Scalar, TrellisError};

use crate::naming::lower_first;

/// One raw parameter declaration, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawParam {
    /// Bare name; a `?` prefix marks it optional.
    Name(String),
    /// `name = default` mapping. Well-formed declarations have one entry.
    Entry(Vec<(String, RawValue)>),
    /// Anything else found where a declaration was expected; holds the type name.
    Other(&'static str),
}

/// The default side of a [`RawParam::Entry`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Scalar(Scalar),
    /// Arrays, tables and other non-scalar values; holds the type name.
    Composite(&'static str),
}

impl RawParam {
    pub fn name(name: impl Into<String>) -> Self {
        RawParam::Name(name.into())
    }

    pub fn entry(name: impl Into<String>, default: Option<Scalar>) -> Self {
        let value = default.map_or(RawValue::Null, RawValue::Scalar);
        RawParam::Entry(vec![(name.into(), value)])
    }
}

impl From<&toml::Value> for RawParam {
    fn from(value: &toml::Value) -> Self {
        match value {
            toml::Value::String(s) => RawParam::Name(s.clone()),
            toml::Value::Table(table) => RawParam::Entry(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), RawValue::from(v)))
                    .collect(),
            ),
            other => RawParam::Other(other.type_str()),
        }
    }
}

impl From<&toml::Value> for RawValue {
    fn from(value: &toml::Value) -> Self {
        match value {
            toml::Value::String(s) => RawValue::Scalar(Scalar::String(s.clone())),
            toml::Value::Integer(i) => RawValue::Scalar(Scalar::Int(*i)),
            toml::Value::Float(f) => RawValue::Scalar(Scalar::Float(*f)),
            toml::Value::Boolean(b) => RawValue::Scalar(Scalar::Bool(*b)),
            other => RawValue::Composite(other.type_str()),
        }
    }
}

/// Canonical parameter contract of one component, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentParams {
    entries: Vec<(String, ParamValue)>,
}

impl ComponentParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the parameters a caller must supply.
    pub fn required(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, v)| v.is_required())
            .map(|(n, _)| n)
            .collect()
    }

    /// Mapping form of this contract; normalizing it yields `self` again.
    pub fn to_raw(&self) -> Vec<RawParam> {
        self.entries
            .iter()
            .map(|(name, value)| RawParam::entry(name.clone(), value.clone().into()))
            .collect()
    }

    fn insert(&mut self, name: String, value: ParamValue) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, value));
        true
    }
}

impl Serialize for ComponentParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ComponentParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = ComponentParams;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of parameter names to defaults")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut params = ComponentParams::new();
                while let Some((name, value)) = access.next_entry::<String, ParamValue>()? {
                    if !params.insert(name.clone(), value) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate parameter \"{name}\""
                        )));
                    }
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParamsVisitor)
    }
}

fn param_error(component: &str, message: String) -> TrellisError {
    TrellisError::Config(format!("component \"{component}\": {message}"))
}

/// Normalize raw declarations of `component` into a canonical contract.
///
/// Duplicate names (after normalization) are rejected rather than letting the
/// later declaration win.
pub fn normalize_params(
    component: &str,
    raw: &[RawParam],
) -> Result<ComponentParams, TrellisError> {
    let mut params = ComponentParams::new();

    for param in raw {
        let (name, value) = match param {
            RawParam::Name(declared) => match declared.strip_prefix('?') {
                Some(optional) => (optional, ParamValue::Null),
                None => (declared.as_str(), ParamValue::Required),
            },
            RawParam::Entry(entries) => {
                let [(declared, default)] = entries.as_slice() else {
                    return Err(param_error(
                        component,
                        format!(
                            "parameter mapping must have exactly one entry, {} given",
                            entries.len()
                        ),
                    ));
                };
                let value = match default {
                    RawValue::Null => ParamValue::Null,
                    RawValue::Scalar(scalar) => ParamValue::from(Some(scalar.clone())),
                    RawValue::Composite(kind) => {
                        return Err(param_error(
                            component,
                            format!("parameter \"{declared}\" value must be scalar, but {kind} given"),
                        ));
                    }
                };
                match declared.strip_prefix('?') {
                    Some(optional) if value != ParamValue::Null => {
                        return Err(param_error(
                            component,
                            format!(
                                "parameter \"{optional}\" cannot be both optional and carry a non-null default"
                            ),
                        ));
                    }
                    Some(optional) => (optional, value),
                    None => (declared.as_str(), value),
                }
            }
            RawParam::Other(kind) => {
                return Err(param_error(
                    component,
                    format!("parameter must be a string or a single-entry mapping, but {kind} given"),
                ));
            }
        };

        if name.trim().is_empty() {
            return Err(param_error(component, "parameter name must not be empty".to_string()));
        }
        let name = lower_first(name);
        if !params.insert(name.clone(), value) {
            return Err(param_error(
                component,
                format!("parameter \"{name}\" is declared more than once"),
            ));
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trellis_core::REQUIRED_MARKER;

    #[test]
    fn shorthand_forms_normalize() {
        let params = normalize_params(
            "articleList",
            &[
                RawParam::name("Id"),
                RawParam::name("?locale"),
                RawParam::entry("limit", Some(Scalar::Int(10))),
                RawParam::entry("?parent", None),
            ],
        )
        .unwrap();

        assert_eq!(params.get("id"), Some(&ParamValue::Required));
        assert_eq!(params.get("locale"), Some(&ParamValue::Null));
        assert_eq!(params.get("limit"), Some(&ParamValue::Value(Scalar::Int(10))));
        assert_eq!(params.get("parent"), Some(&ParamValue::Null));
        assert_eq!(params.required(), vec!["id"]);

        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["id", "locale", "limit", "parent"]);
    }

    #[test]
    fn optional_with_default_is_rejected() {
        let err =
            normalize_params("c", &[RawParam::entry("?id", Some(Scalar::Int(1)))]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("component \"c\""));
        assert!(msg.contains("cannot be both optional and carry a non-null default"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err =
            normalize_params("c", &[RawParam::name("id"), RawParam::name("?Id")]).unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        let two_entries = RawParam::Entry(vec![
            ("a".into(), RawValue::Null),
            ("b".into(), RawValue::Null),
        ]);
        assert!(normalize_params("c", &[two_entries]).is_err());
        assert!(normalize_params("c", &[RawParam::Entry(vec![])]).is_err());
        assert!(normalize_params("c", &[RawParam::Other("integer")]).is_err());
        assert!(normalize_params("c", &[RawParam::name("?")]).is_err());

        let composite = RawParam::Entry(vec![("tags".into(), RawValue::Composite("array"))]);
        let err = normalize_params("c", &[composite]).unwrap_err();
        assert!(err.to_string().contains("must be scalar"));
    }

    #[test]
    fn toml_declarations_convert() {
        let value: toml::Value = toml::from_str(
            r#"params = ["id", "?locale", { limit = 10 }, { tags = ["a"] }, 5]"#,
        )
        .unwrap();
        let raw: Vec<RawParam> = value["params"]
            .as_array()
            .unwrap()
            .iter()
            .map(RawParam::from)
            .collect();

        assert_eq!(raw[0], RawParam::name("id"));
        assert_eq!(raw[1], RawParam::name("?locale"));
        assert_eq!(raw[2], RawParam::entry("limit", Some(Scalar::Int(10))));
        assert_eq!(
            raw[3],
            RawParam::Entry(vec![("tags".into(), RawValue::Composite("array"))])
        );
        assert_eq!(raw[4], RawParam::Other("integer"));
    }

    #[test]
    fn required_marker_in_mapping_form_means_required() {
        let required = RawParam::entry("id", Some(Scalar::from(REQUIRED_MARKER)));
        let params = normalize_params("c", &[required]).unwrap();
        assert_eq!(params.get("id"), Some(&ParamValue::Required));
    }

    #[test]
    fn serializes_as_ordered_mapping() {
        let params = normalize_params(
            "c",
            &[RawParam::name("zeta"), RawParam::entry("alpha", Some(Scalar::Bool(true)))],
        )
        .unwrap();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r##"{"zeta":"#REQUIRED#","alpha":true}"##);

        let back: ComponentParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    fn arb_scalar() -> impl Strategy<Value = Option<Scalar>> {
        prop_oneof![
            Just(None),
            any::<i64>().prop_map(|i| Some(Scalar::Int(i))),
            any::<bool>().prop_map(|b| Some(Scalar::Bool(b))),
            "[a-z]{0,8}".prop_map(|s| Some(Scalar::String(s))),
            Just(Some(Scalar::from(REQUIRED_MARKER))),
        ]
    }

    proptest! {
        /// Validating an already-canonical contract yields itself.
        #[test]
        fn canonical_contract_is_idempotent(
            decls in proptest::collection::btree_map(
                "[a-zA-Z][a-zA-Z0-9]{0,10}",
                arb_scalar(),
                0..8,
            ),
        ) {
            let mut seen = std::collections::HashSet::new();
            let raw: Vec<RawParam> = decls
                .into_iter()
                .filter(|(name, _)| seen.insert(lower_first(name)))
                .map(|(name, default)| RawParam::entry(name, default))
                .collect();

            let canonical = normalize_params("prop", &raw).unwrap();
            let again = normalize_params("prop", &canonical.to_raw()).unwrap();
            prop_assert_eq!(again, canonical);
        }

        /// A `?` name with any non-null default never validates.
        #[test]
        fn optional_name_never_carries_default(
            name in "[a-z]{1,8}",
            default in arb_scalar().prop_filter("non-null", |d| d.is_some()),
        ) {
            let raw = [RawParam::entry(format!("?{name}"), default)];
            prop_assert!(normalize_params("prop", &raw).is_err());
        }
    }
}
